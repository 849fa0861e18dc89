use clap::Parser;
use pessoas_etl::utils::{logger, validation::Validate};
use pessoas_etl::{CliConfig, DocumentPipeline, EtlEngine, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting pessoas-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(settings.workdir.clone());
    let pipeline = DocumentPipeline::new(storage, settings.clone());
    let engine = EtlEngine::new(pipeline);

    let outcome = if cli.dry_run {
        engine.dry_run().await.map(|result| {
            println!("🔍 {} records parsed (nothing written)", result.records.len());
            println!(
                "   MIdade = {}, MPeso = {}, MValor = {}",
                result.summary.mean_age, result.summary.mean_weight, result.summary.mean_money
            );
        })
    } else {
        engine.run().await.map(|output_path| {
            println!("✅ Planilha '{}' gerada e ajustada com sucesso.", output_path);
        })
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
