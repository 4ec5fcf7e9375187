//! 宿主通用加载提示的屏蔽与恢复

use crate::core::host::HostList;

/// 加载提示屏蔽记录
///
/// 重复屏蔽不会覆盖第一次保存的文字。
#[derive(Debug, Default)]
pub struct IndicatorSuppression {
    suppressed: bool,
    saved: Option<String>,
}

impl IndicatorSuppression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// 保存并清空宿主的加载提示
    pub fn disable<H: HostList>(&mut self, host: &mut H) {
        if !self.suppressed {
            self.saved = host.loading_text();
            self.suppressed = true;
            tracing::debug!(saved = ?self.saved, "host loading indicator suppressed");
        }
        host.set_loading_text(None);
    }

    /// 恢复保存的加载提示
    pub fn enable<H: HostList>(&mut self, host: &mut H) {
        if !self.suppressed {
            return;
        }
        self.suppressed = false;
        if let Some(text) = self.saved.take() {
            tracing::debug!(text = %text, "host loading indicator restored");
            host.set_loading_text(Some(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::list_view::ListView;
    use crate::core::store::memory::MemoryStore;

    fn host() -> ListView<MemoryStore> {
        let mut host = ListView::new(10);
        host.set_loading_text(Some("Loading...".into()));
        host
    }

    #[test]
    fn double_disable_keeps_original_text() {
        let mut host = host();
        let mut indicator = IndicatorSuppression::new();

        indicator.disable(&mut host);
        indicator.disable(&mut host);
        assert_eq!(host.loading_text(), None);

        indicator.enable(&mut host);
        assert_eq!(host.loading_text().as_deref(), Some("Loading..."));
        assert!(!indicator.is_suppressed());
    }

    #[test]
    fn enable_restores_only_once() {
        let mut host = host();
        let mut indicator = IndicatorSuppression::new();

        indicator.disable(&mut host);
        indicator.enable(&mut host);
        host.set_loading_text(Some("Please wait".into()));
        indicator.enable(&mut host);

        assert_eq!(host.loading_text().as_deref(), Some("Please wait"));
    }

    #[test]
    fn enable_without_disable_is_noop() {
        let mut host = host();
        let mut indicator = IndicatorSuppression::new();
        indicator.enable(&mut host);
        assert_eq!(host.loading_text().as_deref(), Some("Loading..."));
    }

    #[test]
    fn host_without_text_stays_silent() {
        let mut host = host();
        host.set_loading_text(None);
        let mut indicator = IndicatorSuppression::new();

        indicator.disable(&mut host);
        indicator.enable(&mut host);
        assert_eq!(host.loading_text(), None);
    }
}
