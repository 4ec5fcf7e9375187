//! 滚动区域模型

/// 滚动手势
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollGesture {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// 滚动区域：视口行数、内容行数与当前偏移
#[derive(Debug, Clone)]
pub struct ScrollRegion {
    viewport_rows: usize,
    offset: usize,
    content_rows: usize,
}

impl ScrollRegion {
    /// 创建新的滚动区域
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            viewport_rows: viewport_rows.max(1),
            offset: 0,
            content_rows: 0,
        }
    }

    /// 当前偏移（第一行可见内容的行号）
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    /// 最大可滚动偏移
    pub fn max_offset(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    /// 获取当前页码（从1开始）
    pub fn current_page(&self) -> usize {
        (self.offset / self.viewport_rows) + 1
    }

    /// 获取总页数
    pub fn total_pages(&self) -> usize {
        self.content_rows.div_ceil(self.viewport_rows).max(1)
    }

    /// 执行一次滚动手势
    pub fn apply(&mut self, gesture: ScrollGesture) {
        match gesture {
            ScrollGesture::LineUp => self.scroll_up(),
            ScrollGesture::LineDown => self.scroll_down(),
            ScrollGesture::PageUp => self.page_up(),
            ScrollGesture::PageDown => self.page_down(),
            ScrollGesture::Top => self.go_to_top(),
            ScrollGesture::Bottom => self.go_to_bottom(),
        }
    }

    /// 向上滚动
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// 向下滚动
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    /// 上一页
    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.viewport_rows);
    }

    /// 下一页
    pub fn page_down(&mut self) {
        self.offset =
            (self.offset + self.viewport_rows).min(self.max_offset());
    }

    pub fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// 更新内容行数，偏移不超出范围
    pub fn set_content_rows(&mut self, content_rows: usize) {
        self.content_rows = content_rows;
        self.offset = self.offset.min(self.max_offset());
    }

    /// 更新视口行数
    pub fn set_viewport_rows(&mut self, viewport_rows: usize) {
        self.viewport_rows = viewport_rows.max(1);
        self.offset = self.offset.min(self.max_offset());
    }
}
