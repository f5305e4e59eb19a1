//! Tile Inspect
//!
//! Resolves an OGC API - Tiles tileset and prints its tiling grid, projection
//! and tile URLs as JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::fmt;

use ogc_tiles::{ReqwestTransport, TileInfoClient, TransportConfig};
use tile_inspect::{load_inspect_config, log_filter, InspectConfig, TileSetReport};
use tiles_common::TileCoord;

/// OGC API - Tiles inspector
#[derive(Parser, Debug)]
#[command(name = "tile-inspect")]
#[command(about = "Resolve an OGC API - Tiles tileset and report its tiling grid")]
struct Args {
    /// Tileset document URL
    url: String,

    /// YAML file with negotiation preferences
    #[arg(short, long, env = "TILE_INSPECT_CONFIG")]
    config: Option<PathBuf>,

    /// Preferred tile media type
    #[arg(short, long)]
    media_type: Option<String>,

    /// Acceptable media types, most preferred first (comma separated)
    #[arg(long, value_delimiter = ',')]
    supported: Vec<String>,

    /// Collection to request from a multi-collection tileset (repeatable)
    #[arg(long = "collection")]
    collections: Vec<String>,

    /// CRS overriding the tile matrix set's CRS
    #[arg(long)]
    projection: Option<String>,

    /// Axis order override, e.g. "Lat,Lon"
    #[arg(long, value_delimiter = ',')]
    ordered_axes: Vec<String>,

    /// Template variable as key=value (repeatable)
    #[arg(long = "var", value_parser = parse_key_value)]
    vars: Vec<(String, String)>,

    /// Tile to resolve as z/x/y (repeatable)
    #[arg(short, long = "tile")]
    tiles: Vec<TileCoord>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "TILES_HTTP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level; overrides RUST_LOG when given
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn overrides(&self) -> InspectConfig {
        InspectConfig {
            media_type: self.media_type.clone(),
            supported_media_types: self.supported.clone(),
            collections: self.collections.clone(),
            projection: self.projection.clone(),
            ordered_axes: self.ordered_axes.clone(),
            context: self.vars.iter().cloned().collect(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn init_tracing(log_level: Option<&str>, json: bool) {
    let filter = log_filter(log_level);

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_level.as_deref(), args.json_logs);

    let file_config = match &args.config {
        Some(path) => load_inspect_config(path)?,
        None => InspectConfig::default(),
    };
    let config = file_config.merge(args.overrides());

    let mut transport_config = TransportConfig::from_env();
    if let Some(secs) = config.timeout_secs {
        transport_config.request_timeout = Duration::from_secs(secs);
    }
    let transport =
        ReqwestTransport::new(&transport_config).context("Failed to build HTTP transport")?;
    let client = TileInfoClient::new(transport);

    info!(url = %args.url, "Inspecting tileset");
    let info = client
        .get_tile_set_info(&config.source_info(&args.url))
        .await
        .with_context(|| format!("Failed to resolve tileset {}", args.url))?;

    let report = TileSetReport::new(&info, &args.tiles);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
