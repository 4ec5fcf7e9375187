//! 滚动到底检测

use crate::core::host::HostList;
use crate::core::paging::config::{PagingConfig, ScrollerSource};
use crate::core::paging::signal::SignalSender;

/// 滚动位置是否已到达最大偏移
pub fn reached_end(position: usize, max_position: usize) -> bool {
    position >= max_position
}

/// 滚动监视器，仅在自动分页时订阅宿主的滚动结束信号
#[derive(Debug)]
pub struct ScrollWatcher {
    enabled: bool,
    source: ScrollerSource,
    watching: bool,
}

impl ScrollWatcher {
    pub fn new(config: &PagingConfig) -> Self {
        Self {
            enabled: config.auto_paging,
            source: config.scroller,
            watching: false,
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// 订阅宿主滚动区域；未启用自动分页或已订阅时不做任何事
    pub fn watch<H: HostList>(
        &mut self,
        host: &mut H,
        sender: SignalSender,
    ) {
        if !self.enabled || self.watching {
            return;
        }
        host.on_scroll_end(self.source, sender);
        self.watching = true;
        tracing::debug!(source = ?self.source, "watching scroll end");
    }

    /// 一次滚动结束是否应触发加载
    pub fn should_trigger(
        &self,
        position: usize,
        max_position: usize,
    ) -> bool {
        self.watching && reached_end(position, max_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::list_view::ListView;
    use crate::core::paging::signal::Mailbox;
    use crate::core::store::memory::MemoryStore;

    #[test]
    fn end_is_inclusive() {
        assert!(reached_end(10, 10));
        assert!(reached_end(11, 10));
        assert!(!reached_end(9, 10));
        assert!(reached_end(0, 0));
    }

    #[test]
    fn manual_mode_never_subscribes() {
        let mailbox = Mailbox::new();
        let mut host: ListView<MemoryStore> = ListView::new(5);
        let mut watcher = ScrollWatcher::new(&PagingConfig::default());

        watcher.watch(&mut host, mailbox.sender());

        assert!(!watcher.is_watching());
        assert_eq!(host.scroll_listener_count(), 0);
        assert!(!watcher.should_trigger(3, 3));
    }

    #[test]
    fn auto_mode_subscribes_once() {
        let mailbox = Mailbox::new();
        let mut host: ListView<MemoryStore> = ListView::new(5);
        let config = PagingConfig {
            auto_paging: true,
            ..PagingConfig::default()
        };
        let mut watcher = ScrollWatcher::new(&config);

        watcher.watch(&mut host, mailbox.sender());
        watcher.watch(&mut host, mailbox.sender());

        assert_eq!(host.scroll_listener_count(), 1);
        assert!(watcher.should_trigger(3, 3));
        assert!(!watcher.should_trigger(2, 3));
    }
}
