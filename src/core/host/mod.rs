//! 宿主列表抽象
//!
//! 分页控制器对宿主的全部要求：数据源存取、滚动区域、就绪信号、
//! 尾部停靠区以及两个可读写的属性。

pub mod list_view;

use crate::core::paging::config::ScrollerSource;
use crate::core::paging::signal::SignalSender;
use crate::core::paging::trailing_control::TrailingControl;
use crate::core::store::PagedStore;

/// 尾部控件首次加入宿主时发出的事件
#[derive(Debug, Clone)]
pub struct ControlAdded {
    pub control: TrailingControl,
    pub auto_paging: bool,
}

/// 宿主列表
pub trait HostList {
    type Store: PagedStore + ?Sized;

    /// 宿主是否已完成首次渲染
    fn is_rendered(&self) -> bool;

    /// 注册一次性就绪监听；宿主渲染完成后发送 `Painted` 并丢弃发送端
    fn on_painted(&mut self, listener: SignalSender);

    fn store(&self) -> Option<&Self::Store>;

    fn store_mut(&mut self) -> Option<&mut Self::Store>;

    /// 直接替换数据源，不做任何通知
    ///
    /// 分页场景下应通过 `ListPaging::set_store` 替换，以便先解绑旧数据源。
    fn replace_store(
        &mut self,
        store: Option<Box<Self::Store>>,
    ) -> Option<Box<Self::Store>>;

    /// 订阅指定滚动区域的滚动结束信号
    fn on_scroll_end(
        &mut self,
        source: ScrollerSource,
        listener: SignalSender,
    );

    /// 在尾部停靠区追加控件
    fn append_trailing(&mut self, control: TrailingControl);

    fn emit_control_added(&mut self, event: ControlAdded);

    fn scroll_to_top_on_refresh(&self) -> bool;

    fn set_scroll_to_top_on_refresh(&mut self, enabled: bool);

    /// 通用加载提示文字，`None` 表示不显示
    fn loading_text(&self) -> Option<String>;

    fn set_loading_text(&mut self, text: Option<String>);
}
