//! 分页信号与订阅通道
//!
//! 滚动、点击、宿主就绪和数据源事件统一投递到控制器的信箱，
//! 由控制器在 `pump` 中依次处理，任何回调都不会重入控制器。

use crossbeam_channel::{Receiver, Sender};

use crate::core::store::{StoreEventKind, StoreSnapshot};

/// 投递到控制器的信号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingSignal {
    /// 宿主首次完成渲染
    Painted,
    /// 一次滚动手势结束
    ScrollEnd {
        position: usize,
        max_position: usize,
    },
    /// 尾部控件被点击
    ControlTapped,
    /// 数据源事件，携带投递所用的订阅编号
    Store {
        listener: ListenerId,
        kind: StoreEventKind,
        snapshot: StoreSnapshot,
    },
}

pub type SignalSender = Sender<PagingSignal>;

/// 数据源订阅编号，每次绑定分配一个新编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// 数据源事件监听者
#[derive(Debug, Clone)]
pub struct StoreListener {
    id: ListenerId,
    sender: SignalSender,
}

impl StoreListener {
    pub fn new(id: ListenerId, sender: SignalSender) -> Self {
        Self { id, sender }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// 投递事件；接收端已销毁时返回 false
    pub fn notify(
        &self,
        kind: StoreEventKind,
        snapshot: StoreSnapshot,
    ) -> bool {
        self.sender
            .send(PagingSignal::Store {
                listener: self.id,
                kind,
                snapshot,
            })
            .is_ok()
    }
}

/// 控制器信箱
#[derive(Debug)]
pub struct Mailbox {
    sender: SignalSender,
    receiver: Receiver<PagingSignal>,
}

impl Mailbox {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> SignalSender {
        self.sender.clone()
    }

    /// 取出一条待处理信号
    pub fn next(&self) -> Option<PagingSignal> {
        self.receiver.try_recv().ok()
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}
