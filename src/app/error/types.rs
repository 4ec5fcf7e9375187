//! 错误类型定义

use thiserror::Error;

/// 列表分页错误类型
#[derive(Error, Debug)]
pub enum ListPagingError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 消息模板解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template has no {{message}} placeholder")]
    MissingMessage,

    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}

/// 应用程序通用结果类型
pub type Result<T> = anyhow::Result<T>;
