//! 核心模块：分页控制、数据源、宿主与终端显示

pub mod host;
pub mod input;
pub mod paging;
pub mod store;
pub mod viewer;
