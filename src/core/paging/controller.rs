//! 分页控制器
//!
//! 把滚动、点击和数据源事件三路信号收敛为一个加载状态，
//! 决定何时请求下一页以及尾部控件显示什么。

use std::time::Instant;

use crate::core::host::{ControlAdded, HostList};
use crate::core::paging::binding::StoreBinding;
use crate::core::paging::config::PagingConfig;
use crate::core::paging::indicator::IndicatorSuppression;
use crate::core::paging::scroll_watcher::ScrollWatcher;
use crate::core::paging::signal::{
    ListenerId, Mailbox, PagingSignal, SignalSender,
};
use crate::core::paging::state::PageState;
use crate::core::paging::template::MessageTemplate;
use crate::core::paging::trailing_control::TrailingControl;
use crate::core::store::{
    LoadOptions, PagedStore, StoreEventKind, StoreSnapshot,
};

/// 挂载阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachPhase {
    Detached,
    /// 宿主尚未渲染，等待一次性的 `Painted`
    AwaitingPaint,
    /// 已绑定数据源并追加尾部控件
    Attached,
}

/// 分页控制器
#[derive(Debug)]
pub struct PagingController {
    config: PagingConfig,
    state: PageState,
    phase: AttachPhase,
    mailbox: Mailbox,
    binding: StoreBinding,
    watcher: ScrollWatcher,
    indicator: IndicatorSuppression,
    control: TrailingControl,
}

impl PagingController {
    /// 创建控制器
    pub fn new(config: PagingConfig) -> Self {
        let mailbox = Mailbox::new();
        let template = MessageTemplate::from_config(
            config.message_template.as_deref(),
        );
        let control = TrailingControl::new(
            template,
            config.prefix.clone(),
            &config.load_more_text,
            mailbox.sender(),
        );

        Self {
            binding: StoreBinding::new(mailbox.sender()),
            watcher: ScrollWatcher::new(&config),
            state: PageState::new(),
            phase: AttachPhase::Detached,
            indicator: IndicatorSuppression::new(),
            control,
            mailbox,
            config,
        }
    }

    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    pub fn phase(&self) -> AttachPhase {
        self.phase
    }

    pub fn is_attached(&self) -> bool {
        self.phase == AttachPhase::Attached
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn control(&self) -> &TrailingControl {
        &self.control
    }

    /// 当前数据源订阅编号
    pub fn active_listener(&self) -> Option<ListenerId> {
        self.binding.active()
    }

    /// 投递信号用的发送端
    pub fn sender(&self) -> SignalSender {
        self.mailbox.sender()
    }

    /// 挂载到宿主
    ///
    /// 宿主未渲染时等待一次性的就绪信号；重复挂载不做任何事。
    pub fn attach<H: HostList>(&mut self, host: &mut H) {
        match self.phase {
            AttachPhase::Attached | AttachPhase::AwaitingPaint => {
                tracing::debug!(phase = ?self.phase, "attach ignored");
            }
            AttachPhase::Detached if host.is_rendered() => {
                self.initialize(host);
            }
            AttachPhase::Detached => {
                host.on_painted(self.mailbox.sender());
                self.phase = AttachPhase::AwaitingPaint;
                tracing::debug!("host not rendered, waiting for paint");
            }
        }
    }

    fn initialize<H: HostList>(&mut self, host: &mut H) {
        if let Some(store) = host.store_mut() {
            self.binding.bind(store);
        }

        host.append_trailing(self.control.clone());
        host.emit_control_added(ControlAdded {
            control: self.control.clone(),
            auto_paging: self.config.auto_paging,
        });

        self.watcher.watch(host, self.mailbox.sender());
        self.phase = AttachPhase::Attached;
        tracing::debug!(
            auto_paging = self.config.auto_paging,
            "list paging attached"
        );
    }

    /// 换绑数据源：先退订旧数据源，再订阅新数据源
    pub fn rebind<S: PagedStore + ?Sized>(
        &mut self,
        old: Option<&mut S>,
        new: Option<&mut S>,
    ) {
        self.binding.rebind(old, new);
    }

    /// 处理信箱中全部待处理信号，返回处理条数
    pub fn pump<H: HostList>(&mut self, host: &mut H) -> usize {
        let mut handled = 0;
        while let Some(signal) = self.mailbox.next() {
            self.handle(host, signal);
            handled += 1;
        }
        handled
    }

    /// 处理一条信号
    pub fn handle<H: HostList>(
        &mut self,
        host: &mut H,
        signal: PagingSignal,
    ) {
        match signal {
            PagingSignal::Painted => {
                if self.phase == AttachPhase::AwaitingPaint {
                    self.initialize(host);
                } else {
                    tracing::debug!(phase = ?self.phase, "paint ignored");
                }
            }
            PagingSignal::ScrollEnd {
                position,
                max_position,
            } => {
                if self.watcher.should_trigger(position, max_position) {
                    self.on_scroll_reached_end(host);
                }
            }
            PagingSignal::ControlTapped => {
                self.on_trailing_control_activated(host);
            }
            PagingSignal::Store {
                listener,
                kind,
                snapshot,
            } => {
                if !self.binding.accepts(listener) {
                    tracing::debug!(
                        listener = ?listener,
                        kind = ?kind,
                        "dropping event from unbound store"
                    );
                    return;
                }
                match kind {
                    StoreEventKind::BeforeLoad => {
                        self.on_store_before_load(&snapshot)
                    }
                    StoreEventKind::Load => {
                        self.on_store_load(host, &snapshot)
                    }
                    StoreEventKind::Filter => {
                        self.on_store_filter(&snapshot)
                    }
                }
            }
        }
    }

    /// 宿主数据源是否已全部加载
    ///
    /// 没有数据源时视为已加载，不发出请求。
    pub fn is_fully_loaded<H: HostList>(&self, host: &H) -> bool {
        host.store()
            .map(|store| store.snapshot().is_fully_loaded())
            .unwrap_or(true)
    }

    /// 请求下一页
    ///
    /// 先处理信箱中积压的信号，使加载状态反映已发生的数据源事件；
    /// 已全部加载或已在加载中时不做任何事，返回是否真正发出了请求。
    pub fn request_next_page<H: HostList>(&mut self, host: &mut H) -> bool {
        self.pump(host);
        self.try_request(host)
    }

    fn try_request<H: HostList>(&mut self, host: &mut H) -> bool {
        if self.is_fully_loaded(host) {
            tracing::debug!("next page skipped: store fully loaded");
            return false;
        }
        if self.state.is_loading() {
            tracing::debug!("next page skipped: load in flight");
            return false;
        }

        let scroll_to_top = host.scroll_to_top_on_refresh();
        host.set_scroll_to_top_on_refresh(false);
        self.indicator.disable(host);
        self.state.begin(Instant::now(), Some(scroll_to_top));
        self.control.set_busy(true);

        if let Some(store) = host.store_mut() {
            tracing::debug!(
                page = store.current_page() + 1,
                "requesting next page"
            );
            store.next_page(LoadOptions { add_records: true });
        }
        true
    }

    /// 滚动到底部
    pub fn on_scroll_reached_end<H: HostList>(&mut self, host: &mut H) {
        if !self.config.auto_paging {
            return;
        }
        if self.state.is_loading() {
            tracing::debug!("scroll end ignored: load in flight");
            return;
        }
        self.try_request(host);
    }

    /// 点击尾部控件
    pub fn on_trailing_control_activated<H: HostList>(
        &mut self,
        host: &mut H,
    ) {
        self.try_request(host);
    }

    /// 新数据源首次填充前隐藏控件，避免“加载更多”闪现
    pub fn on_store_before_load(&mut self, snapshot: &StoreSnapshot) {
        if snapshot.count == 0 {
            self.control.hide();
        }
    }

    pub fn on_store_load<H: HostList>(
        &mut self,
        host: &mut H,
        snapshot: &StoreSnapshot,
    ) {
        self.settle(host);
        self.render_control(snapshot);

        tracing::debug!(
            count = snapshot.count,
            page = snapshot.current_page,
            total = ?snapshot.total_count,
            fully_loaded = snapshot.is_fully_loaded(),
            "store loaded"
        );
    }

    /// 数据源已有记录时显示控件并按是否加载完毕设置文字
    fn render_control(&mut self, snapshot: &StoreSnapshot) {
        if snapshot.count == 0 {
            return;
        }
        let message = if snapshot.is_fully_loaded() {
            &self.config.no_more_records_text
        } else {
            &self.config.load_more_text
        };
        self.control.show();
        self.control.set_message(message);
    }

    /// 数据源已被替换：旧数据源的在途请求不会再有结果
    fn abandon_load<H: HostList>(&mut self, host: &mut H) {
        if !self.state.is_loading() {
            return;
        }
        tracing::debug!("store replaced mid-load, dropping in-flight request");
        self.settle(host);
    }

    pub fn on_store_filter(&mut self, snapshot: &StoreSnapshot) {
        if snapshot.count == 0 {
            self.control.hide();
        } else {
            self.control.show();
        }
    }

    /// 加载停滞超时后强制回到空闲，返回是否发生了重置
    pub fn check_stall<H: HostList>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) -> bool {
        let Some(timeout) = self.config.stall_timeout() else {
            return false;
        };
        if !self.state.is_stalled(now, timeout) {
            return false;
        }

        tracing::warn!(
            timeout_ms = timeout.as_millis() as u64,
            "page load stalled, resetting to idle"
        );
        self.settle(host);
        true
    }

    /// Loading → Idle 并恢复宿主设置
    fn settle<H: HostList>(&mut self, host: &mut H) {
        if let Some(Some(scroll_to_top)) = self.state.finish() {
            host.set_scroll_to_top_on_refresh(scroll_to_top);
        }
        self.control.set_busy(false);
        self.indicator.enable(host);
    }
}

/// 宿主与分页控制器的组合
///
/// 数据源替换的唯一入口：`set_store` 先换绑事件，再让宿主安装新数据源。
#[derive(Debug)]
pub struct ListPaging<H: HostList> {
    host: H,
    controller: PagingController,
}

impl<H: HostList> ListPaging<H> {
    /// 创建控制器并挂载到宿主
    pub fn attach(mut host: H, config: PagingConfig) -> Self {
        let mut controller = PagingController::new(config);
        controller.attach(&mut host);
        Self { host, controller }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn controller(&self) -> &PagingController {
        &self.controller
    }

    pub fn control(&self) -> &TrailingControl {
        self.controller.control()
    }

    /// 替换宿主数据源，返回旧数据源
    ///
    /// 旧数据源的在途请求随换绑作废，控制器回到空闲；
    /// 新数据源已有记录时立即按其状态刷新尾部控件。
    pub fn set_store(
        &mut self,
        store: Option<Box<H::Store>>,
    ) -> Option<Box<H::Store>> {
        let mut store = store;
        if !self.controller.is_attached() {
            return self.host.replace_store(store);
        }

        self.controller
            .rebind(self.host.store_mut(), store.as_deref_mut());
        self.controller.abandon_load(&mut self.host);
        let old = self.host.replace_store(store);
        if let Some(snapshot) = self.host.store().map(|s| s.snapshot()) {
            self.controller.render_control(&snapshot);
        }
        old
    }

    pub fn pump(&mut self) -> usize {
        self.controller.pump(&mut self.host)
    }

    pub fn request_next_page(&mut self) -> bool {
        self.controller.request_next_page(&mut self.host)
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.controller.is_fully_loaded(&self.host)
    }

    pub fn check_stall(&mut self, now: Instant) -> bool {
        self.controller.check_stall(&mut self.host, now)
    }

    pub fn into_parts(self) -> (H, PagingController) {
        (self.host, self.controller)
    }
}
