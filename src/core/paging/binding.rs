//! 数据源事件绑定

use crate::core::paging::signal::{ListenerId, SignalSender, StoreListener};
use crate::core::store::{PagedStore, StoreEventKind};

/// 当前数据源的订阅
///
/// 同一时刻只有一个有效订阅；换绑时先退订旧数据源再订阅新数据源。
#[derive(Debug)]
pub struct StoreBinding {
    sender: SignalSender,
    next_id: u64,
    active: Option<ListenerId>,
}

impl StoreBinding {
    pub fn new(sender: SignalSender) -> Self {
        Self {
            sender,
            next_id: 1,
            active: None,
        }
    }

    pub fn active(&self) -> Option<ListenerId> {
        self.active
    }

    /// 信号是否来自当前订阅
    pub fn accepts(&self, listener: ListenerId) -> bool {
        self.active == Some(listener)
    }

    /// 订阅数据源的三种事件
    pub fn bind<S: PagedStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        for kind in StoreEventKind::ALL {
            store.subscribe(
                kind,
                StoreListener::new(id, self.sender.clone()),
            );
        }
        self.active = Some(id);
        tracing::debug!(listener = ?id, "store bound");
        id
    }

    /// 退订当前数据源
    pub fn unbind<S: PagedStore + ?Sized>(&mut self, store: &mut S) {
        let Some(id) = self.active.take() else {
            return;
        };
        for kind in StoreEventKind::ALL {
            store.unsubscribe(kind, id);
        }
        tracing::debug!(listener = ?id, "store unbound");
    }

    /// 换绑：先退订旧数据源，再订阅新数据源
    pub fn rebind<S: PagedStore + ?Sized>(
        &mut self,
        old: Option<&mut S>,
        new: Option<&mut S>,
    ) {
        match old {
            Some(old) => self.unbind(old),
            None => self.active = None,
        }
        if let Some(new) = new {
            self.bind(new);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paging::signal::Mailbox;
    use crate::core::store::memory::{
        CallJournal, MemoryStore, SubscriptionCall,
    };

    #[test]
    fn bind_subscribes_all_three_events() {
        let mailbox = Mailbox::new();
        let mut binding = StoreBinding::new(mailbox.sender());
        let mut store = MemoryStore::new("a", 10);

        let id = binding.bind(&mut store);

        assert_eq!(
            store.subscription_log(),
            &[
                SubscriptionCall::Subscribe(StoreEventKind::BeforeLoad, id),
                SubscriptionCall::Subscribe(StoreEventKind::Load, id),
                SubscriptionCall::Subscribe(StoreEventKind::Filter, id),
            ]
        );
        assert!(binding.accepts(id));
    }

    #[test]
    fn rebind_unsubscribes_old_before_new() {
        let mailbox = Mailbox::new();
        let mut binding = StoreBinding::new(mailbox.sender());
        let mut old = MemoryStore::new("old", 10);
        let mut new = MemoryStore::new("new", 10);
        let first = binding.bind(&mut old);

        binding.rebind(Some(&mut old), Some(&mut new));

        assert_eq!(old.listener_count(), 0);
        assert_eq!(new.listener_count(), 3);
        assert!(old.subscription_log()[3..].iter().all(|call| matches!(
            call,
            SubscriptionCall::Unsubscribe(_, id) if *id == first
        )));
        let second = binding.active().unwrap();
        assert_ne!(first, second);
        assert!(!binding.accepts(first));
    }

    #[test]
    fn journal_shows_unsubscribe_before_subscribe() {
        let mailbox = Mailbox::new();
        let journal = CallJournal::default();
        let mut binding = StoreBinding::new(mailbox.sender());
        let mut old =
            MemoryStore::new("old", 10).with_journal(journal.clone());
        let mut new =
            MemoryStore::new("new", 10).with_journal(journal.clone());
        binding.bind(&mut old);
        journal.borrow_mut().clear();

        binding.rebind(Some(&mut old), Some(&mut new));

        let calls = journal.borrow();
        assert_eq!(calls.len(), 6);
        assert!(calls[..3].iter().all(|(name, call)| name == "old"
            && matches!(call, SubscriptionCall::Unsubscribe(..))));
        assert!(calls[3..].iter().all(|(name, call)| name == "new"
            && matches!(call, SubscriptionCall::Subscribe(..))));
    }

    #[test]
    fn rebind_to_nothing_clears_binding() {
        let mailbox = Mailbox::new();
        let mut binding = StoreBinding::new(mailbox.sender());
        let mut old = MemoryStore::new("old", 10);
        binding.bind(&mut old);

        binding.rebind(Some(&mut old), None);

        assert_eq!(binding.active(), None);
        assert_eq!(old.listener_count(), 0);
    }
}
