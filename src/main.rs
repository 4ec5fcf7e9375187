//! 列表分页演示程序

use list_paging::app::error::types::Result;
use list_paging::cli;

fn main() -> Result<()> {
    // 运行命令行界面（日志在解析参数后初始化）
    cli::run_cli()
}
