use clap::Parser;
use tracing::debug;

use urlshrink::cli::Cli;
use urlshrink::config::{get_config, init_config};
use urlshrink::interfaces::cli::run_cli_command;
use urlshrink::system::init_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_config(cli.config.as_deref());
    let config = get_config();

    // 日志初始化失败不影响命令执行
    let guard = match init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            None
        }
    };
    debug!("Running command: {:?}", cli.command);

    if let Err(e) = run_cli_command(cli.command, &config).await {
        eprintln!("{}", e.format_colored());
        drop(guard);
        std::process::exit(e.exit_code());
    }
}
