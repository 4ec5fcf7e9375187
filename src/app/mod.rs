//! 应用层：配置、错误与日志

pub mod config;
pub mod error;
pub mod logging;
