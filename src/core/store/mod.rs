//! 分页数据源抽象
//!
//! 数据源负责真正的取数；分页控制器只读取计数并请求下一页，
//! 通过 `beforeload` / `load` / `filter` 三种事件获知加载进度。

pub mod memory;

use crate::core::paging::signal::{ListenerId, StoreListener};

/// 数据源事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEventKind {
    BeforeLoad,
    Load,
    Filter,
}

impl StoreEventKind {
    /// 分页控制器订阅的全部事件
    pub const ALL: [StoreEventKind; 3] = [
        StoreEventKind::BeforeLoad,
        StoreEventKind::Load,
        StoreEventKind::Filter,
    ];
}

/// 事件发出时数据源的计数快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub count: usize,
    pub total_count: Option<usize>,
    pub current_page: usize,
    pub page_size: usize,
}

impl StoreSnapshot {
    /// 已知总数且已加载到总数所在页
    ///
    /// 总数未知（无限模式）时永远返回 false。
    pub fn is_fully_loaded(&self) -> bool {
        match self.total_count {
            Some(total) => {
                total
                    <= self.current_page.saturating_mul(self.page_size)
            }
            None => false,
        }
    }
}

/// 加载选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// 追加到现有记录之后，而不是替换
    pub add_records: bool,
}

/// 分页数据源
pub trait PagedStore {
    /// 当前（过滤后）记录数
    fn count(&self) -> usize;

    /// 服务端报告的总数
    fn total_count(&self) -> Option<usize>;

    /// 当前页码（从1开始，未加载时为0）
    fn current_page(&self) -> usize;

    fn page_size(&self) -> usize;

    /// 请求下一页
    fn next_page(&mut self, options: LoadOptions);

    fn subscribe(
        &mut self,
        kind: StoreEventKind,
        listener: StoreListener,
    );

    fn unsubscribe(&mut self, kind: StoreEventKind, id: ListenerId);

    /// 推进进行中的加载；自行完成加载的数据源无需实现
    fn poll(&mut self) {}

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            count: self.count(),
            total_count: self.total_count(),
            current_page: self.current_page(),
            page_size: self.page_size(),
        }
    }
}
