//! 命令行界面模块

pub mod args;
pub mod list_viewer;

use clap::Parser;
use colored::*;

use crate::app::config::settings::load_settings;
use crate::app::error::types::Result;
use crate::app::logging::setup::{init_logging, resolve_log_path};

use self::args::CliArgs;
use self::list_viewer::ListViewer;

/// 运行命令行界面
pub fn run_cli() -> Result<()> {
    let args = CliArgs::parse();

    // 初始化日志系统
    let log_path = resolve_log_path(args.log_file.as_deref());
    init_logging(log_path.as_deref())?;

    // 读取配置文件
    let mut settings = match load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{} {:#}", "错误".red().bold(), err);
            std::process::exit(1);
        }
    };
    args.apply(&mut settings);
    settings.validate()?;

    // 创建列表查看器
    let mut viewer = ListViewer::new(settings, args.no_color);

    // 运行查看器
    viewer.run()
}
