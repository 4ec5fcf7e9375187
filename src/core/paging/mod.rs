//! 列表无限分页
//!
//! 控制器监听滚动、点击和数据源三路信号，保证同一数据源同时最多只有
//! 一个下一页请求在途，并驱动列表末尾的尾部控件。

pub mod binding;
pub mod config;
pub mod controller;
pub mod indicator;
pub mod scroll_watcher;
pub mod signal;
pub mod state;
pub mod template;
pub mod trailing_control;

pub use config::{PagingConfig, ScrollerSource};
pub use controller::{AttachPhase, ListPaging, PagingController};
pub use signal::PagingSignal;
pub use trailing_control::TrailingControl;
