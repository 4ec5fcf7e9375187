//! 尾部控件消息模板
//!
//! 支持 `{message}` 与 `{prefix}` 两个占位符，`{{` / `}}` 转义花括号。

use crate::app::error::types::TemplateError;

/// 内置模板
pub const DEFAULT_TEMPLATE: &str = "·· {message} ··";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Message,
    Prefix,
}

/// 编译后的消息模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// 编译模板文本
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    text.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::UnbalancedBrace(index));
                    }
                    let segment = match name.trim() {
                        "message" => Segment::Message,
                        "prefix" => Segment::Prefix,
                        _ => {
                            return Err(TemplateError::UnknownPlaceholder(
                                name,
                            ))
                        }
                    };
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(segment);
                }
                '}' => return Err(TemplateError::UnbalancedBrace(index)),
                _ => text.push(ch),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        if !segments.contains(&Segment::Message) {
            return Err(TemplateError::MissingMessage);
        }

        Ok(Self { segments })
    }

    /// 按配置取模板，缺省或非法时退回内置模板
    pub fn from_config(source: Option<&str>) -> Self {
        match source {
            Some(source) => Self::compile(source).unwrap_or_else(|err| {
                tracing::warn!(
                    error = %err,
                    "falling back to default message template"
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// 渲染消息
    pub fn render(&self, prefix: &str, message: &str) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Message => output.push_str(message),
                Segment::Prefix => output.push_str(prefix),
            }
        }
        output
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            segments: vec![
                Segment::Text("·· ".into()),
                Segment::Message,
                Segment::Text(" ··".into()),
            ],
        }
    }
}
