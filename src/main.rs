// Main entry point - Dependency injection and event loop
use std::sync::Arc;
use std::time::Duration;
use template_downloads_dashboard::application::dashboard_controller::DashboardController;
use template_downloads_dashboard::infrastructure::config::load_dashboard_config;
use template_downloads_dashboard::infrastructure::http_client::HttpDataClient;
use template_downloads_dashboard::infrastructure::svg_chart::SvgChartBackend;
use template_downloads_dashboard::infrastructure::terminal_page::TerminalPage;
use template_downloads_dashboard::presentation::commands::HELP;
use template_downloads_dashboard::presentation::console::event_stream;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    tracing::info!("Using analytics API at {}", config.api.base_url);

    // Collaborators
    let api = Arc::new(HttpDataClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?);
    let page = Arc::new(TerminalPage::new(config.export.directory.clone()));
    let backend = Arc::new(SvgChartBackend::new(true));

    let mut dashboard = DashboardController::new(api, page, backend, config.dashboard.selector());
    dashboard.boot().await;

    println!("{}", HELP);
    let events = Box::pin(event_stream(BufReader::new(tokio::io::stdin())));
    dashboard.run(events).await;

    Ok(())
}
