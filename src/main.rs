use clap::Parser;

use varlsb::{
    cli::{Cli, Commands},
    handler::{handle_hide, handle_recover, handle_run},
};

/// 程序的主入口点
///
/// 初始化日志 (可通过 `RUST_LOG` 调整级别)，解析命令行参数，
/// 并根据子命令将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hide(args) => handle_hide(args).map(|_| ()),
        Commands::Recover(args) => handle_recover(args),
        Commands::Run(args) => handle_run(args),
    }
}
