//! 分页状态

use std::time::{Duration, Instant};

/// 加载阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    /// 已发出下一页请求，等待数据源 `load`
    Loading {
        started_at: Instant,
        /// 请求前宿主的“刷新时滚动到顶部”设置
        scroll_restore: Option<bool>,
    },
}

/// 分页状态
#[derive(Debug, Clone)]
pub struct PageState {
    phase: LoadPhase,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Idle,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading { .. })
    }

    /// 保存的滚动设置
    pub fn scroll_restore(&self) -> Option<bool> {
        match self.phase {
            LoadPhase::Loading { scroll_restore, .. } => scroll_restore,
            LoadPhase::Idle => None,
        }
    }

    /// Idle → Loading；已在加载中时返回 false
    pub fn begin(
        &mut self,
        now: Instant,
        scroll_restore: Option<bool>,
    ) -> bool {
        if self.is_loading() {
            return false;
        }
        self.phase = LoadPhase::Loading {
            started_at: now,
            scroll_restore,
        };
        true
    }

    /// Loading → Idle，返回需要恢复的滚动设置
    ///
    /// 原本就处于 Idle 时返回 `None`。
    pub fn finish(&mut self) -> Option<Option<bool>> {
        match std::mem::replace(&mut self.phase, LoadPhase::Idle) {
            LoadPhase::Loading { scroll_restore, .. } => {
                Some(scroll_restore)
            }
            LoadPhase::Idle => None,
        }
    }

    /// 加载是否已超过 `timeout`
    pub fn is_stalled(&self, now: Instant, timeout: Duration) -> bool {
        match self.phase {
            LoadPhase::Loading { started_at, .. } => {
                now.saturating_duration_since(started_at) >= timeout
            }
            LoadPhase::Idle => false,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_twice_is_rejected() {
        let mut state = PageState::new();
        let now = Instant::now();

        assert!(state.begin(now, Some(true)));
        assert!(!state.begin(now, Some(false)));
        assert_eq!(state.scroll_restore(), Some(true));
    }

    #[test]
    fn finish_returns_saved_value_once() {
        let mut state = PageState::new();
        state.begin(Instant::now(), Some(true));

        assert_eq!(state.finish(), Some(Some(true)));
        assert!(!state.is_loading());
        assert_eq!(state.finish(), None);
    }

    #[test]
    fn stall_needs_timeout_to_elapse() {
        let mut state = PageState::new();
        let start = Instant::now();
        let timeout = Duration::from_millis(500);
        assert!(!state.is_stalled(start + timeout, timeout));

        state.begin(start, None);
        assert!(!state.is_stalled(start + Duration::from_millis(499), timeout));
        assert!(state.is_stalled(start + timeout, timeout));
    }
}
