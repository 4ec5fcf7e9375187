//! 命令行参数定义

use clap::Parser;
use std::path::PathBuf;

use crate::app::config::settings::Settings;

/// 列表分页演示 - 滚动到底自动加载或点击“加载更多”的终端列表
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// 配置文件路径 (默认: <配置目录>/list-paging/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 滚动到底部时自动加载下一页
    #[arg(short, long)]
    pub auto_paging: bool,

    /// 每页记录数
    #[arg(short = 'p', long = "page-size")]
    pub page_size: Option<usize>,

    /// 服务端报告的总记录数 (不指定: 总数未知)
    #[arg(short = 't', long = "total")]
    pub total: Option<usize>,

    /// “加载更多” 文字
    #[arg(long = "load-more-text")]
    pub load_more_text: Option<String>,

    /// 全部加载完毕时的文字
    #[arg(long = "no-more-text")]
    pub no_more_text: Option<String>,

    /// 模拟加载延迟 (事件循环节拍数)
    #[arg(long = "latency")]
    pub latency_ticks: Option<u32>,

    /// 禁用颜色输出
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// 日志输出文件 (默认写入缓存目录下的 list-paging/list-paging.log)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// 用命令行参数覆盖配置文件
    pub fn apply(&self, settings: &mut Settings) {
        if self.auto_paging {
            settings.paging.auto_paging = true;
        }
        if let Some(page_size) = self.page_size {
            settings.store.page_size = page_size;
        }
        if let Some(total) = self.total {
            settings.store.total_count = Some(total);
        }
        if let Some(text) = &self.load_more_text {
            settings.paging.load_more_text = text.clone();
        }
        if let Some(text) = &self.no_more_text {
            settings.paging.no_more_records_text = text.clone();
        }
        if let Some(ticks) = self.latency_ticks {
            settings.store.latency_ticks = ticks;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_settings() {
        let args = CliArgs::parse_from([
            "list-paging",
            "--auto-paging",
            "--page-size",
            "15",
            "--total",
            "45",
            "--no-more-text",
            "That's all",
        ]);
        let mut settings = Settings::default();
        settings.store.latency_ticks = 3;

        args.apply(&mut settings);

        assert!(settings.paging.auto_paging);
        assert_eq!(settings.store.page_size, 15);
        assert_eq!(settings.store.total_count, Some(45));
        assert_eq!(settings.paging.no_more_records_text, "That's all");
        assert_eq!(settings.paging.load_more_text, "Load More...");
        assert_eq!(settings.store.latency_ticks, 3);
    }
}
