use clap::Parser;
use course_planner::app::runner;
use course_planner::utils::logger;
use course_planner::CliConfig;

#[tokio::main]
async fn main() {
    // .env is optional; a missing file is not an error
    let dotenv = dotenvy::dotenv();

    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = runner::run(&cli, &mut stdout).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "Planning failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤類別決定退出碼
        std::process::exit(e.exit_code());
    }
}
