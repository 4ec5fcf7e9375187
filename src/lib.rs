//! 列表无限分页：滚动到底自动加载或点击“加载更多”

pub mod app;
pub mod cli;
pub mod core;

pub use crate::core::host::{list_view::ListView, ControlAdded, HostList};
pub use crate::core::paging::{
    ListPaging, PagingConfig, PagingController, ScrollerSource,
};
pub use crate::core::store::{
    memory::MemoryStore, LoadOptions, PagedStore, StoreEventKind,
    StoreSnapshot,
};
