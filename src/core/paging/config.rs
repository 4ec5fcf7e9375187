//! 分页配置

use std::time::Duration;

use serde::Deserialize;

/// 滚动区域来源
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScrollerSource {
    /// 列表自身的滚动区域
    #[default]
    Own,
    /// 最近的可滚动父容器（自适应布局时列表本身不滚动）
    Parent,
}

/// 分页插件配置，绑定期间不可变
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PagingConfig {
    /// 滚动到底部时自动加载下一页
    pub auto_paging: bool,
    /// "加载更多" 按钮文字
    pub load_more_text: String,
    /// 数据已全部加载时的文字
    pub no_more_records_text: String,
    /// 尾部控件消息模板，缺省或非法时使用内置模板
    pub message_template: Option<String>,
    /// 模板中 `{prefix}` 的取值
    pub prefix: String,
    pub scroller: ScrollerSource,
    /// 加载停滞超时（毫秒），缺省时永不超时
    pub stall_timeout_ms: Option<u64>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            auto_paging: false,
            load_more_text: "Load More...".into(),
            no_more_records_text: "No More Records".into(),
            message_template: None,
            prefix: "x-".into(),
            scroller: ScrollerSource::Own,
            stall_timeout_ms: None,
        }
    }
}

impl PagingConfig {
    /// 停滞超时
    pub fn stall_timeout(&self) -> Option<Duration> {
        self.stall_timeout_ms.map(Duration::from_millis)
    }
}
