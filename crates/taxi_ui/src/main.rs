mod app;
mod ui;

use clap::Parser;

use crate::app::AppConfig;
use crate::ui::constants::DEFAULT_TILE_TEMPLATE;
use taxi_core::routing::DEFAULT_OSRM_ENDPOINT;

/// Interactive taxi booking map: pick trip endpoints, fetch a driving route,
/// and watch the simulated fleet roam.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// OSRM routing endpoint.
    #[arg(long, default_value = DEFAULT_OSRM_ENDPOINT)]
    router_endpoint: String,
    /// Raster tile URL template with {s}/{z}/{x}/{y} placeholders.
    #[arg(long, default_value = DEFAULT_TILE_TEMPLATE)]
    tile_template: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taxi_ui=info,taxi_core=info")),
        )
        .init();

    let args = Args::parse();
    ui::app_shell::run(AppConfig {
        router_endpoint: args.router_endpoint,
        tile_template: args.tile_template,
    })
}
