//! 内存分页数据源
//!
//! 按页生成记录并模拟加载延迟，同时记录订阅与请求调用，
//! 供终端演示和测试使用。

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::core::paging::signal::{ListenerId, StoreListener};
use crate::core::store::{
    LoadOptions, PagedStore, StoreEventKind, StoreSnapshot,
};

/// 一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: usize,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// 订阅调用记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionCall {
    Subscribe(StoreEventKind, ListenerId),
    Unsubscribe(StoreEventKind, ListenerId),
}

/// 跨数据源共享的订阅调用日志，记录 `(数据源名, 调用)`
pub type CallJournal = Rc<RefCell<Vec<(String, SubscriptionCall)>>>;

/// 进行中的加载
#[derive(Debug, Clone, Copy)]
struct PendingLoad {
    page: usize,
    append: bool,
    ticks_left: u32,
}

/// 内存分页数据源
pub struct MemoryStore {
    name: String,
    page_size: usize,
    current_page: usize,
    /// 服务端报告的总数
    reported_total: Option<usize>,
    /// 实际可取的记录数，`None` 表示无穷
    available: Option<usize>,
    latency_ticks: u32,
    records: Vec<Record>,
    filter: Option<String>,
    pending: Option<PendingLoad>,
    listeners: Vec<(StoreEventKind, StoreListener)>,
    subscription_log: Vec<SubscriptionCall>,
    journal: Option<CallJournal>,
    page_requests: Vec<LoadOptions>,
}

impl MemoryStore {
    /// 创建空数据源（总数未知、无限记录、无延迟）
    pub fn new(name: impl Into<String>, page_size: usize) -> Self {
        Self {
            name: name.into(),
            page_size: page_size.max(1),
            current_page: 0,
            reported_total: None,
            available: None,
            latency_ticks: 0,
            records: Vec::new(),
            filter: None,
            pending: None,
            listeners: Vec::new(),
            subscription_log: Vec::new(),
            journal: None,
            page_requests: Vec::new(),
        }
    }

    /// 设置总数；同时限制可取记录数
    pub fn with_total(mut self, total: Option<usize>) -> Self {
        self.reported_total = total;
        self.available = total;
        self
    }

    /// 单独限制可取记录数（不影响报告的总数）
    pub fn with_available(mut self, available: Option<usize>) -> Self {
        self.available = available;
        self
    }

    /// 加载在 `ticks` 次 `poll` 之后完成
    pub fn with_latency(mut self, ticks: u32) -> Self {
        self.latency_ticks = ticks;
        self
    }

    /// 同时把订阅调用写入共享日志
    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 首次加载（替换现有记录）
    pub fn load(&mut self) {
        self.begin_load(1, false);
    }

    /// 当前可见记录
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records
            .iter()
            .filter(move |record| self.matches(record))
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// 设置标题过滤条件并发出 `filter` 事件
    pub fn set_filter(&mut self, query: Option<String>) {
        self.filter = query.filter(|q| !q.is_empty());
        tracing::debug!(
            store = %self.name,
            filter = ?self.filter,
            count = self.count(),
            "store filtered"
        );
        self.emit(StoreEventKind::Filter);
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// 向当前订阅者发出事件
    pub fn emit(&self, kind: StoreEventKind) {
        let snapshot = self.snapshot();
        for (_, listener) in
            self.listeners.iter().filter(|(k, _)| *k == kind)
        {
            if !listener.notify(kind, snapshot) {
                tracing::warn!(
                    store = %self.name,
                    listener = ?listener.id(),
                    "store listener receiver dropped"
                );
            }
        }
    }

    pub fn subscription_log(&self) -> &[SubscriptionCall] {
        &self.subscription_log
    }

    /// 收到的下一页请求
    pub fn page_requests(&self) -> &[LoadOptions] {
        &self.page_requests
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn record_call(&mut self, call: SubscriptionCall) {
        self.subscription_log.push(call);
        if let Some(journal) = &self.journal {
            journal.borrow_mut().push((self.name.clone(), call));
        }
    }

    fn matches(&self, record: &Record) -> bool {
        match &self.filter {
            Some(query) => record.title.contains(query.as_str()),
            None => true,
        }
    }

    fn begin_load(&mut self, page: usize, append: bool) {
        self.emit(StoreEventKind::BeforeLoad);
        self.pending = Some(PendingLoad {
            page,
            append,
            ticks_left: self.latency_ticks,
        });
        if self.latency_ticks == 0 {
            self.complete_load();
        }
    }

    fn complete_load(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let start = (pending.page - 1) * self.page_size;
        let mut end = start + self.page_size;
        if let Some(available) = self.available {
            end = end.min(available);
        }
        let now = Utc::now();
        let fetched: Vec<Record> = (start..end.max(start))
            .map(|id| Record {
                id,
                title: format!("{} #{:04}", self.name, id + 1),
                created_at: now,
            })
            .collect();

        if !pending.append {
            self.records.clear();
        }
        let fetched_len = fetched.len();
        self.records.extend(fetched);
        self.current_page = pending.page;

        tracing::debug!(
            store = %self.name,
            page = pending.page,
            fetched = fetched_len,
            count = self.count(),
            "store page loaded"
        );
        self.emit(StoreEventKind::Load);
    }
}

impl PagedStore for MemoryStore {
    fn count(&self) -> usize {
        match self.filter {
            Some(_) => self.records().count(),
            None => self.records.len(),
        }
    }

    fn total_count(&self) -> Option<usize> {
        self.reported_total
    }

    fn current_page(&self) -> usize {
        self.current_page
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn next_page(&mut self, options: LoadOptions) {
        self.page_requests.push(options);
        let page = self.current_page + 1;
        self.begin_load(page, options.add_records);
    }

    fn subscribe(
        &mut self,
        kind: StoreEventKind,
        listener: StoreListener,
    ) {
        self.record_call(SubscriptionCall::Subscribe(kind, listener.id()));
        self.listeners.push((kind, listener));
    }

    fn unsubscribe(&mut self, kind: StoreEventKind, id: ListenerId) {
        self.record_call(SubscriptionCall::Unsubscribe(kind, id));
        self.listeners
            .retain(|(k, listener)| !(*k == kind && listener.id() == id));
    }

    fn poll(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.ticks_left = pending.ticks_left.saturating_sub(1);
        if pending.ticks_left == 0 {
            self.complete_load();
        }
    }

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            count: self.count(),
            total_count: self.reported_total,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paging::signal::{Mailbox, PagingSignal};

    fn listen(store: &mut MemoryStore, mailbox: &Mailbox, id: u64) {
        for kind in StoreEventKind::ALL {
            store.subscribe(
                kind,
                StoreListener::new(ListenerId(id), mailbox.sender()),
            );
        }
    }

    fn kinds(mailbox: &Mailbox) -> Vec<StoreEventKind> {
        std::iter::from_fn(|| mailbox.next())
            .filter_map(|signal| match signal {
                PagingSignal::Store { kind, .. } => Some(kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn load_emits_before_load_then_load() {
        let mailbox = Mailbox::new();
        let mut store = MemoryStore::new("orders", 20).with_total(Some(45));
        listen(&mut store, &mailbox, 1);

        store.load();

        assert_eq!(
            kinds(&mailbox),
            vec![StoreEventKind::BeforeLoad, StoreEventKind::Load]
        );
        assert_eq!(store.count(), 20);
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn next_page_appends_until_available_runs_out() {
        let mut store = MemoryStore::new("orders", 20).with_total(Some(45));
        store.load();
        store.next_page(LoadOptions { add_records: true });
        store.next_page(LoadOptions { add_records: true });
        assert_eq!(store.count(), 45);
        assert_eq!(store.current_page(), 3);

        store.next_page(LoadOptions { add_records: true });
        assert_eq!(store.count(), 45);
        assert_eq!(store.page_requests().len(), 3);
    }

    #[test]
    fn replace_load_drops_existing_records() {
        let mut store = MemoryStore::new("orders", 10);
        store.load();
        store.next_page(LoadOptions { add_records: false });
        assert_eq!(store.count(), 10);
        assert_eq!(store.records().next().map(|r| r.id), Some(10));
    }

    #[test]
    fn latency_defers_completion_until_polled() {
        let mailbox = Mailbox::new();
        let mut store = MemoryStore::new("orders", 5).with_latency(2);
        listen(&mut store, &mailbox, 7);

        store.load();
        assert!(store.is_loading());
        assert_eq!(kinds(&mailbox), vec![StoreEventKind::BeforeLoad]);

        store.poll();
        assert!(store.is_loading());
        store.poll();
        assert!(!store.is_loading());
        assert_eq!(kinds(&mailbox), vec![StoreEventKind::Load]);
        assert_eq!(store.count(), 5);
    }

    #[test]
    fn filter_narrows_count_and_emits() {
        let mailbox = Mailbox::new();
        let mut store = MemoryStore::new("orders", 20);
        store.load();
        listen(&mut store, &mailbox, 3);

        store.set_filter(Some("#001".into()));
        assert_eq!(store.count(), 10);
        assert_eq!(kinds(&mailbox), vec![StoreEventKind::Filter]);

        store.set_filter(Some(String::new()));
        assert_eq!(store.filter(), None);
        assert_eq!(store.count(), 20);
    }

    #[test]
    fn unsubscribe_removes_only_matching_listener() {
        let mailbox = Mailbox::new();
        let mut store = MemoryStore::new("orders", 20);
        listen(&mut store, &mailbox, 1);
        listen(&mut store, &mailbox, 2);

        for kind in StoreEventKind::ALL {
            store.unsubscribe(kind, ListenerId(1));
        }
        assert_eq!(store.listener_count(), 3);

        store.emit(StoreEventKind::Load);
        match mailbox.next() {
            Some(PagingSignal::Store { listener, .. }) => {
                assert_eq!(listener, ListenerId(2))
            }
            other => panic!("unexpected signal: {other:?}"),
        }
        assert!(mailbox.next().is_none());
    }
}
