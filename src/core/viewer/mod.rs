//! 终端显示

pub mod display_utils;
pub mod scroll;
pub mod terminal;
