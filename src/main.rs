// Main entry point - Dependency injection and page publication
mod domain;
mod application;
mod infrastructure;

use std::sync::Arc;

use crate::application::publish_service::PlotPublishService;
use crate::application::site::Site;
use crate::infrastructure::config::load_wave_config;
use crate::infrastructure::fake_time_series::FakeTimeSeries;
use crate::infrastructure::wave_transport::WaveHttpTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_wave_config()?;

    // Create transport (infrastructure layer)
    let transport = Arc::new(WaveHttpTransport::new(&config.server)?);

    // Create sample source
    let mut source = FakeTimeSeries::from_config(&config.demo.series, config.demo.seed)?;

    // Create service (application layer)
    let service = PlotPublishService::new(Site::new(transport), config.demo.clone());

    tracing::info!("Publishing {} to {}", config.demo.route, config.server.address);
    let page = service.run(&mut source).await?;
    tracing::info!("Done, {} card(s) live on {}", page.cards().count(), page.route);

    Ok(())
}
