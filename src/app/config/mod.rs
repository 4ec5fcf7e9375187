//! 配置加载

pub mod settings;
