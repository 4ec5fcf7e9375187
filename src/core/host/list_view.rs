//! 无界面列表宿主
//!
//! 持有数据源、滚动区域与尾部停靠区；终端查看器和测试都以它为宿主。

use crate::core::host::{ControlAdded, HostList};
use crate::core::paging::config::ScrollerSource;
use crate::core::paging::signal::{PagingSignal, SignalSender};
use crate::core::paging::trailing_control::TrailingControl;
use crate::core::store::PagedStore;
use crate::core::viewer::scroll::{ScrollGesture, ScrollRegion};

/// 默认加载提示
pub const DEFAULT_LOADING_TEXT: &str = "Loading...";

type ControlAddedListener = Box<dyn FnMut(&ControlAdded)>;

/// 父容器滚动区域：列表内容之外还有若干固定行
struct ParentScroller {
    region: ScrollRegion,
    extra_rows: usize,
}

/// 列表宿主
pub struct ListView<S: PagedStore + ?Sized = dyn PagedStore> {
    rendered: bool,
    painted_listeners: Vec<SignalSender>,
    store: Option<Box<S>>,
    /// 上次同步时的记录数，用于识别内容刷新
    synced_records: usize,
    scroller: ScrollRegion,
    parent: Option<ParentScroller>,
    scroll_listeners: Vec<(ScrollerSource, SignalSender)>,
    trailing: Vec<TrailingControl>,
    scroll_to_top_on_refresh: bool,
    loading_text: Option<String>,
    control_added_listeners: Vec<ControlAddedListener>,
}

impl<S: PagedStore + ?Sized> ListView<S> {
    /// 创建未渲染、无数据源的宿主
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            rendered: false,
            painted_listeners: Vec::new(),
            store: None,
            synced_records: 0,
            scroller: ScrollRegion::new(viewport_rows),
            parent: None,
            scroll_listeners: Vec::new(),
            trailing: Vec::new(),
            scroll_to_top_on_refresh: true,
            loading_text: Some(DEFAULT_LOADING_TEXT.to_string()),
            control_added_listeners: Vec::new(),
        }
    }

    pub fn with_store(mut self, store: Box<S>) -> Self {
        self.store = Some(store);
        self
    }

    /// 列表嵌在可滚动父容器中，父容器另有 `extra_rows` 行固定内容
    pub fn with_parent_scroller(
        mut self,
        viewport_rows: usize,
        extra_rows: usize,
    ) -> Self {
        self.parent = Some(ParentScroller {
            region: ScrollRegion::new(viewport_rows),
            extra_rows,
        });
        self
    }

    /// 标记为已渲染（不发送就绪信号）
    pub fn rendered(mut self) -> Self {
        self.rendered = true;
        self
    }

    /// 完成首次渲染，通知并丢弃一次性监听
    pub fn paint(&mut self) {
        if self.rendered {
            return;
        }
        self.rendered = true;
        for listener in self.painted_listeners.drain(..) {
            let _ = listener.send(PagingSignal::Painted);
        }
        self.sync_content();
    }

    /// 按数据源记录数和可见的尾部控件同步内容行数
    ///
    /// 记录数变化视为一次刷新：开启“刷新回顶”时滚回顶部。
    pub fn sync_content(&mut self) {
        let records = self.store.as_ref().map_or(0, |store| store.count());
        let controls =
            self.trailing.iter().filter(|c| c.is_visible()).count();
        let rows = records + controls;

        self.scroller.set_content_rows(rows);
        if let Some(parent) = self.parent.as_mut() {
            parent.region.set_content_rows(rows + parent.extra_rows);
        }

        if records != self.synced_records {
            self.synced_records = records;
            if self.scroll_to_top_on_refresh {
                self.go_to_top();
            }
        }
    }

    fn go_to_top(&mut self) {
        self.scroller.go_to_top();
        if let Some(parent) = self.parent.as_mut() {
            parent.region.go_to_top();
        }
    }

    /// 执行一次滚动手势，结束后通知该区域的监听者
    pub fn scroll(&mut self, source: ScrollerSource, gesture: ScrollGesture) {
        self.sync_content();
        let region = self.region_mut(source);
        region.apply(gesture);
        let position = region.offset();
        let max_position = region.max_offset();

        let source = self.resolve(source);
        for (_, listener) in self
            .scroll_listeners
            .iter()
            .filter(|(s, _)| self.resolve(*s) == source)
        {
            let _ = listener.send(PagingSignal::ScrollEnd {
                position,
                max_position,
            });
        }
    }

    pub fn scroller(&self, source: ScrollerSource) -> &ScrollRegion {
        match (source, self.parent.as_ref()) {
            (ScrollerSource::Parent, Some(parent)) => &parent.region,
            _ => &self.scroller,
        }
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.scroller.set_viewport_rows(rows);
    }

    pub fn trailing_controls(&self) -> &[TrailingControl] {
        &self.trailing
    }

    /// 注册尾部控件加入事件的监听者
    pub fn on_control_added(
        &mut self,
        listener: impl FnMut(&ControlAdded) + 'static,
    ) {
        self.control_added_listeners.push(Box::new(listener));
    }

    pub fn scroll_listener_count(&self) -> usize {
        self.scroll_listeners.len()
    }

    /// 没有父容器时父区域即自身区域
    fn resolve(&self, source: ScrollerSource) -> ScrollerSource {
        match source {
            ScrollerSource::Parent if self.parent.is_some() => {
                ScrollerSource::Parent
            }
            _ => ScrollerSource::Own,
        }
    }

    fn region_mut(&mut self, source: ScrollerSource) -> &mut ScrollRegion {
        match (source, self.parent.as_mut()) {
            (ScrollerSource::Parent, Some(parent)) => &mut parent.region,
            _ => &mut self.scroller,
        }
    }
}

impl<S: PagedStore + ?Sized> HostList for ListView<S> {
    type Store = S;

    fn is_rendered(&self) -> bool {
        self.rendered
    }

    fn on_painted(&mut self, listener: SignalSender) {
        self.painted_listeners.push(listener);
    }

    fn store(&self) -> Option<&S> {
        self.store.as_deref()
    }

    fn store_mut(&mut self) -> Option<&mut S> {
        self.store.as_deref_mut()
    }

    fn replace_store(&mut self, store: Option<Box<S>>) -> Option<Box<S>> {
        let old = std::mem::replace(&mut self.store, store);
        if self.scroll_to_top_on_refresh {
            self.go_to_top();
        }
        self.sync_content();
        old
    }

    fn on_scroll_end(
        &mut self,
        source: ScrollerSource,
        listener: SignalSender,
    ) {
        if source == ScrollerSource::Parent && self.parent.is_none() {
            tracing::warn!("no parent scroller, watching own region");
        }
        self.scroll_listeners.push((source, listener));
    }

    fn append_trailing(&mut self, control: TrailingControl) {
        self.trailing.push(control);
    }

    fn emit_control_added(&mut self, event: ControlAdded) {
        for listener in &mut self.control_added_listeners {
            listener(&event);
        }
    }

    fn scroll_to_top_on_refresh(&self) -> bool {
        self.scroll_to_top_on_refresh
    }

    fn set_scroll_to_top_on_refresh(&mut self, enabled: bool) {
        self.scroll_to_top_on_refresh = enabled;
    }

    fn loading_text(&self) -> Option<String> {
        self.loading_text.clone()
    }

    fn set_loading_text(&mut self, text: Option<String>) {
        self.loading_text = text;
    }
}
