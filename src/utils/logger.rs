use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "pessoas_etl=debug,pessoas_dashboard=debug,info"
    } else {
        "pessoas_etl=info,pessoas_dashboard=info,warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 儀表板使用 JSON 格式，方便收集請求日誌
pub fn init_server_logger(debug: bool, json: bool) {
    let registry = tracing_subscriber::registry().with(default_filter(debug));

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(debug)
                    .with_thread_ids(false)
                    .compact(),
            )
            .init();
    }
}
