//! 尾部控件：列表末尾的加载提示兼“加载更多”按钮

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::paging::signal::{PagingSignal, SignalSender};
use crate::core::paging::template::MessageTemplate;

/// 控件显示状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub visible: bool,
    /// 加载中样式
    pub busy: bool,
    pub message: String,
    /// 模板渲染结果
    pub markup: String,
}

struct Inner {
    state: ControlState,
    template: MessageTemplate,
    prefix: String,
}

/// 尾部控件句柄
///
/// 控制器与宿主停靠区共享同一个控件，克隆得到的是同一实例。
#[derive(Clone)]
pub struct TrailingControl {
    inner: Rc<RefCell<Inner>>,
    tap: SignalSender,
}

impl TrailingControl {
    /// 创建隐藏的控件
    pub fn new(
        template: MessageTemplate,
        prefix: impl Into<String>,
        message: &str,
        tap: SignalSender,
    ) -> Self {
        let prefix = prefix.into();
        let markup = template.render(&prefix, message);
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: ControlState {
                    visible: false,
                    busy: false,
                    message: message.to_string(),
                    markup,
                },
                template,
                prefix,
            })),
            tap,
        }
    }

    pub fn show(&self) {
        self.inner.borrow_mut().state.visible = true;
    }

    pub fn hide(&self) {
        self.inner.borrow_mut().state.visible = false;
    }

    pub fn set_message(&self, message: &str) {
        let mut inner = self.inner.borrow_mut();
        let markup = inner.template.render(&inner.prefix, message);
        inner.state.message = message.to_string();
        inner.state.markup = markup;
    }

    pub fn set_busy(&self, busy: bool) {
        self.inner.borrow_mut().state.busy = busy;
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().state.visible
    }

    pub fn is_busy(&self) -> bool {
        self.inner.borrow().state.busy
    }

    pub fn message(&self) -> String {
        self.inner.borrow().state.message.clone()
    }

    pub fn markup(&self) -> String {
        self.inner.borrow().state.markup.clone()
    }

    pub fn state(&self) -> ControlState {
        self.inner.borrow().state.clone()
    }

    /// 点击控件；隐藏时不响应
    pub fn activate(&self) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.tap.send(PagingSignal::ControlTapped).is_ok()
    }

    /// 两个句柄是否指向同一控件
    pub fn same_as(&self, other: &TrailingControl) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TrailingControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailingControl")
            .field("state", &self.inner.borrow().state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paging::signal::Mailbox;

    fn control(mailbox: &Mailbox) -> TrailingControl {
        TrailingControl::new(
            MessageTemplate::compile("<{prefix}msg>{message}").unwrap(),
            "x-",
            "Load More...",
            mailbox.sender(),
        )
    }

    #[test]
    fn starts_hidden_with_rendered_markup() {
        let mailbox = Mailbox::new();
        let control = control(&mailbox);
        assert!(!control.is_visible());
        assert!(!control.is_busy());
        assert_eq!(control.markup(), "<x-msg>Load More...");
    }

    #[test]
    fn clones_share_state() {
        let mailbox = Mailbox::new();
        let control = control(&mailbox);
        let docked = control.clone();

        control.show();
        control.set_message("No More Records");
        assert!(docked.is_visible());
        assert_eq!(docked.markup(), "<x-msg>No More Records");
        assert!(docked.same_as(&control));
    }

    #[test]
    fn tap_only_when_visible() {
        let mailbox = Mailbox::new();
        let control = control(&mailbox);

        assert!(!control.activate());
        assert!(mailbox.next().is_none());

        control.show();
        assert!(control.activate());
        assert_eq!(mailbox.next(), Some(PagingSignal::ControlTapped));
    }
}
