//! 显示工具函数

use colored::*;

use crate::core::paging::trailing_control::ControlState;
use crate::core::store::memory::Record;

/// 加载动画帧
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// 截断到指定显示宽度
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut output: String =
        text.chars().take(width.saturating_sub(1)).collect();
    output.push('…');
    output
}

/// 格式化一行记录
pub fn format_record_row(record: &Record, width: usize) -> String {
    let line = format!(
        "{:>6}  {}  {}",
        record.id + 1,
        record.created_at.format("%H:%M:%S"),
        record.title
    );
    truncate_to_width(&line, width)
}

/// 格式化尾部控件
///
/// 加载中时在消息前显示动画帧。
pub fn format_control_line(
    state: &ControlState,
    frame: usize,
    width: usize,
) -> String {
    let text = if state.busy {
        let spinner = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
        format!("{} {}", spinner, state.markup)
    } else {
        state.markup.clone()
    };
    let text = truncate_to_width(&text, width);
    if state.busy {
        text.bright_yellow().to_string()
    } else {
        text.bright_cyan().bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(busy: bool) -> ControlState {
        ControlState {
            visible: true,
            busy,
            message: "Load More...".into(),
            markup: "·· Load More... ··".into(),
        }
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 4), "abc");
    }

    #[test]
    fn busy_control_shows_spinner() {
        colored::control::set_override(false);
        assert_eq!(
            format_control_line(&state(true), 1, 80),
            "/ ·· Load More... ··"
        );
        assert_eq!(
            format_control_line(&state(false), 1, 80),
            "·· Load More... ··"
        );
    }
}
