use afs_split::utils::{logger, validation::Validate};
use afs_split::{CliConfig, LocalStorage, SplitEngine, SplitError, SplitPipeline};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let settings = match cli.to_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(".".to_string());
    let pipeline = SplitPipeline::new(storage, settings)?;
    let engine = SplitEngine::new(pipeline);

    match engine.run() {
        Ok(report) => print!("{}", report.render()),
        // 找不到輸入檔不算失敗，照常結束
        Err(e @ SplitError::InputNotFound { .. }) => {
            tracing::debug!("{}", e);
            println!("{}", e.user_friendly_message());
        }
        Err(e) => {
            tracing::error!("❌ Split failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            return Err(e.into());
        }
    }

    Ok(())
}
