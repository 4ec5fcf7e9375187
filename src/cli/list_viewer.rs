//! 终端列表查看器
//!
//! 以 `ListView` 为宿主、`MemoryStore` 为数据源，在原始模式终端里
//! 演示自动分页、点击加载、过滤和切换数据源。

use colored::*;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::app::config::settings::{Settings, StoreSettings};
use crate::app::error::types::Result;
use crate::core::host::list_view::ListView;
use crate::core::host::HostList;
use crate::core::input::keyboard::{KeyboardHandler, ViewerAction};
use crate::core::paging::config::ScrollerSource;
use crate::core::paging::controller::ListPaging;
use crate::core::store::memory::MemoryStore;
use crate::core::store::PagedStore;
use crate::core::viewer::display_utils::{
    format_control_line, format_record_row,
};
use crate::core::viewer::terminal::TerminalManager;

/// 状态栏占用的行数
const RESERVED_LINES: usize = 6;

/// 事件循环节拍
const TICK: Duration = Duration::from_millis(120);

/// 过滤开关使用的条件
const FILTER_QUERY: &str = "5";

/// 列表查看器
pub struct ListViewer {
    paging: ListPaging<ListView<MemoryStore>>,
    settings: Settings,
    no_color: bool,
    terminal_manager: TerminalManager,
    keyboard_handler: KeyboardHandler,
    store_generation: usize,
    frame: usize,
    status: String,
    needs_redraw: bool,
}

impl ListViewer {
    /// 创建新的列表查看器
    pub fn new(settings: Settings, no_color: bool) -> Self {
        let terminal_manager = TerminalManager::new();
        let rows =
            terminal_manager.calculate_display_lines(RESERVED_LINES);

        let store = build_store(&settings.store, 0);
        let mut host = ListView::new(rows).with_store(Box::new(store));
        host.on_control_added(|event| {
            tracing::debug!(
                auto_paging = event.auto_paging,
                "load more control added to list"
            );
        });

        // 宿主此时尚未渲染，控制器会等待首次渲染后再挂载
        let paging = ListPaging::attach(host, settings.paging.clone());

        Self {
            paging,
            settings,
            no_color,
            terminal_manager,
            keyboard_handler: KeyboardHandler::default(),
            store_generation: 0,
            frame: 0,
            status: String::new(),
            needs_redraw: true,
        }
    }

    /// 运行查看器
    pub fn run(&mut self) -> Result<()> {
        if self.no_color {
            colored::control::set_override(false);
        }

        self.interactive_mode()
    }

    /// 交互模式
    fn interactive_mode(&mut self) -> Result<()> {
        self.terminal_manager.enter_raw_mode()?;

        // 首次渲染并加载第一页
        self.paging.host_mut().paint();
        self.settle_signals();
        if let Some(store) = self.paging.host_mut().store_mut() {
            store.load();
        }
        self.settle_signals();

        loop {
            self.update_terminal_size();

            if self.needs_redraw {
                self.terminal_manager.clear_screen()?;
                self.display_current_page()?;
                self.display_help()?;
                io::stdout().flush()?;
                self.needs_redraw = false;
            }

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        code,
                        kind: KeyEventKind::Press,
                        ..
                    }) => {
                        let Some(action) =
                            self.keyboard_handler.action(&code)
                        else {
                            continue;
                        };
                        if !self.handle_action(action) {
                            break;
                        }
                    }
                    Event::Resize(..) => {
                        self.needs_redraw = true;
                    }
                    _ => {}
                }
            } else {
                self.tick();
            }

            self.settle_signals();
        }

        // 恢复终端（由 TerminalManager 的 Drop trait 自动处理）
        Ok(())
    }

    /// 处理动作，返回 false 表示退出
    fn handle_action(&mut self, action: ViewerAction) -> bool {
        match action {
            ViewerAction::Quit => return false,
            ViewerAction::Scroll(gesture) => {
                let source = self.settings.paging.scroller;
                self.paging.host_mut().scroll(source, gesture);
            }
            ViewerAction::Activate => {
                if !self.paging.control().activate() {
                    self.status = "没有可点击的加载控件".into();
                }
            }
            ViewerAction::ToggleFilter => {
                if let Some(store) = self.paging.host_mut().store_mut() {
                    let query = match store.filter() {
                        Some(_) => None,
                        None => Some(FILTER_QUERY.to_string()),
                    };
                    self.status = match &query {
                        Some(q) => format!("过滤: 标题包含 \"{}\"", q),
                        None => "已清除过滤".into(),
                    };
                    store.set_filter(query);
                }
            }
            ViewerAction::SwapStore => {
                self.store_generation += 1;
                let store =
                    build_store(&self.settings.store, self.store_generation);
                self.status = format!("切换数据源: {}", store.name());
                self.paging.set_store(Some(Box::new(store)));
                if let Some(store) = self.paging.host_mut().store_mut() {
                    store.load();
                }
            }
            ViewerAction::Reload => {
                if let Some(store) = self.paging.host_mut().store_mut() {
                    store.load();
                }
            }
        }
        self.needs_redraw = true;
        true
    }

    /// 推进模拟加载与加载动画
    fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if let Some(store) = self.paging.host_mut().store_mut() {
            if store.is_loading() {
                store.poll();
                self.needs_redraw = true;
            }
        }
    }

    /// 处理积压的分页信号
    fn settle_signals(&mut self) {
        // 先按加载期间的“刷新回顶”设置同步新内容，控制器随后才会恢复它
        self.paging.host_mut().sync_content();
        let handled = self.paging.pump();
        let stalled = self.paging.check_stall(Instant::now());
        self.paging.host_mut().sync_content();
        if stalled {
            self.status = "加载超时，已重置".into();
        }
        if handled > 0 || stalled {
            self.needs_redraw = true;
        }
    }

    /// 更新终端尺寸
    fn update_terminal_size(&mut self) {
        let rows = self
            .terminal_manager
            .calculate_display_lines(RESERVED_LINES);
        let host = self.paging.host_mut();
        if rows != host.scroller(ScrollerSource::Own).viewport_rows() {
            host.set_viewport_rows(rows);
            self.needs_redraw = true;
        }
    }

    /// 显示当前页
    fn display_current_page(&self) -> Result<()> {
        let (width, _) = self.terminal_manager.get_size();
        let host = self.paging.host();
        let region = host.scroller(ScrollerSource::Own);
        let Some(store) = host.store() else {
            return Ok(());
        };

        let mut lines: Vec<String> = store
            .records()
            .skip(region.offset())
            .take(region.viewport_rows())
            .map(|record| format_record_row(record, width))
            .collect();

        let control = self.paging.control().state();
        let reached_tail =
            region.offset() + lines.len() >= store.count();
        if control.visible
            && reached_tail
            && lines.len() < region.viewport_rows()
        {
            lines.push(format_control_line(&control, self.frame, width));
        }

        for line in lines {
            // 原始模式下使用显式的\r\n
            print!("{}\r\n", line);
        }

        io::stdout().flush()?;
        Ok(())
    }

    /// 显示状态栏与帮助信息
    fn display_help(&self) -> Result<()> {
        let host = self.paging.host();
        let region = host.scroller(ScrollerSource::Own);
        let (count, total, page) = host
            .store()
            .map(|s| (s.count(), s.total_count(), s.current_page()))
            .unwrap_or((0, None, 0));
        let total = total
            .map(|t| t.to_string())
            .unwrap_or_else(|| "未知".into());
        let mode = if self.settings.paging.auto_paging {
            "自动"
        } else {
            "手动"
        };
        let store_loading = host.store().is_some_and(|s| s.is_loading());
        let loading = match host.loading_text() {
            Some(text) if store_loading => {
                text.as_str().bright_yellow().to_string()
            }
            _ if self.paging.controller().is_loading() => {
                "加载中".bright_yellow().to_string()
            }
            _ => "空闲".bright_green().to_string(),
        };

        print!("\r\n");
        print!("{}\r\n", "=".repeat(80));
        let summary = format!(
            "第 {} 屏 / 共 {} 屏 | 记录 {} / 总数 {} | 数据页 {} | {}分页 | ",
            region.current_page(),
            region.total_pages(),
            count,
            total,
            page,
            mode,
        );
        print!("{}{}\r\n", summary.bright_white().bold(), loading);
        print!("{}\r\n", "导航: ↑↓ 逐行 | ←→ 翻屏 | Home/End | Enter 加载更多 | f 过滤 | s 切换数据源 | r 重新加载 | ESC/q 退出".bright_black());
        print!("{}\r\n", self.status);

        io::stdout().flush()?;
        Ok(())
    }
}

/// 按代次构建数据源：偶数代使用配置的总数，奇数代总数未知
fn build_store(settings: &StoreSettings, generation: usize) -> MemoryStore {
    let total = if generation % 2 == 0 {
        settings.total_count
    } else {
        None
    };
    MemoryStore::new(format!("store-{}", generation + 1), settings.page_size)
        .with_total(total)
        .with_latency(settings.latency_ticks)
}
