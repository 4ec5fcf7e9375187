//! 输入处理

pub mod keyboard;
