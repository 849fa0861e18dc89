use anyhow::Context;
use clap::Parser;
use pessoas_etl::config::toml_config::TomlConfig;
use pessoas_etl::core::Storage;
use pessoas_etl::dashboard::server;
use pessoas_etl::dashboard::{DashboardTable, EnrichOptions};
use pessoas_etl::sheet::read_sheet;
use pessoas_etl::utils::{logger, validation::Validate};
use pessoas_etl::LocalStorage;

#[derive(Parser)]
#[command(name = "pessoas-dashboard")]
#[command(about = "Interactive dashboard over the people spreadsheet")]
struct Args {
    /// Spreadsheet produced by pessoas-etl
    spreadsheet: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Turn debug logging off (it is on by default)
    #[arg(long)]
    no_debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    }
    .dashboard;

    if let Some(spreadsheet) = args.spreadsheet {
        config.spreadsheet_path = spreadsheet;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.no_debug {
        config.debug = false;
    }
    config.json_logs |= args.json_logs;

    logger::init_server_logger(config.debug, config.json_logs);
    tracing::info!("🚀 Starting pessoas-dashboard");
    tracing::debug!("Dashboard config: {:?}", config);

    config.validate().context("invalid dashboard configuration")?;
    let addr = config.bind_address()?;

    let storage = LocalStorage::new(".".to_string());
    let bytes = storage
        .read_file(&config.spreadsheet_path)
        .await
        .with_context(|| format!("cannot read spreadsheet '{}'", config.spreadsheet_path))?;
    let records = read_sheet(bytes, &config.sheet_name)?;
    tracing::info!("📄 Loaded {} rows from {}", records.len(), config.spreadsheet_path);

    let options = EnrichOptions {
        sales_seed: config.sales_seed,
        start_date: config.start_date,
        threshold: config.threshold,
    };
    let table = DashboardTable::build(records, &options)?;

    server::serve(table, addr).await?;
    Ok(())
}
