//! 键盘输入处理

use crossterm::event::KeyCode;
use std::time::Instant;

use crate::core::viewer::scroll::ScrollGesture;

/// 查看器动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Scroll(ScrollGesture),
    /// 点击尾部控件
    Activate,
    ToggleFilter,
    SwapStore,
    Reload,
    Quit,
}

/// 键盘输入处理器
pub struct KeyboardHandler {
    last_key_time: Instant,
    last_key_code: Option<KeyCode>,
    debounce_duration_ms: u64,
}

impl KeyboardHandler {
    /// 创建新的键盘处理器
    pub fn new(debounce_duration_ms: u64) -> Self {
        Self {
            last_key_time: Instant::now(),
            last_key_code: None,
            debounce_duration_ms,
        }
    }

    /// 判断是否应该处理按键（防抖处理）
    pub fn should_process_key(
        &mut self,
        code: &KeyCode,
    ) -> bool {
        let now = Instant::now();
        let time_since_last =
            now.duration_since(self.last_key_time);

        // 同一个键必须间隔指定时间
        let is_same_key =
            self.last_key_code.as_ref() == Some(code);
        if is_same_key
            && time_since_last.as_millis()
                < self.debounce_duration_ms as u128
        {
            return false;
        }

        self.last_key_code = Some(*code);
        self.last_key_time = now;

        true
    }

    /// 按键对应的动作（经过防抖）
    pub fn action(&mut self, code: &KeyCode) -> Option<ViewerAction> {
        if !self.should_process_key(code) {
            return None;
        }
        map_key(code)
    }
}

impl Default for KeyboardHandler {
    /// 150ms 防抖
    fn default() -> Self {
        Self::new(150)
    }
}

/// 按键映射
pub fn map_key(code: &KeyCode) -> Option<ViewerAction> {
    let action = match code {
        KeyCode::Esc | KeyCode::Char('q') => ViewerAction::Quit,
        KeyCode::Up | KeyCode::Char('k') => {
            ViewerAction::Scroll(ScrollGesture::LineUp)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            ViewerAction::Scroll(ScrollGesture::LineDown)
        }
        KeyCode::PageUp | KeyCode::Left => {
            ViewerAction::Scroll(ScrollGesture::PageUp)
        }
        KeyCode::PageDown | KeyCode::Right => {
            ViewerAction::Scroll(ScrollGesture::PageDown)
        }
        KeyCode::Home => ViewerAction::Scroll(ScrollGesture::Top),
        KeyCode::End => ViewerAction::Scroll(ScrollGesture::Bottom),
        KeyCode::Enter | KeyCode::Char(' ') => ViewerAction::Activate,
        KeyCode::Char('f') => ViewerAction::ToggleFilter,
        KeyCode::Char('s') => ViewerAction::SwapStore,
        KeyCode::Char('r') => ViewerAction::Reload,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_and_paging_keys() {
        assert_eq!(
            map_key(&KeyCode::End),
            Some(ViewerAction::Scroll(ScrollGesture::Bottom))
        );
        assert_eq!(map_key(&KeyCode::Enter), Some(ViewerAction::Activate));
        assert_eq!(map_key(&KeyCode::Char('q')), Some(ViewerAction::Quit));
        assert_eq!(map_key(&KeyCode::Char('x')), None);
    }

    #[test]
    fn repeated_key_is_debounced() {
        let mut handler = KeyboardHandler::new(60_000);
        assert!(handler.action(&KeyCode::Down).is_some());
        assert!(handler.action(&KeyCode::Down).is_none());
        assert!(handler.action(&KeyCode::Up).is_some());
    }
}
