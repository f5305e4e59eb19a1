//! Tileset inspection tool.
//!
//! Loads caller preferences from YAML and the command line, negotiates a
//! tileset and renders a JSON report of the result.

pub mod config;
pub mod logging;
pub mod report;

pub use config::{load_inspect_config, InspectConfig};
pub use logging::log_filter;
pub use report::{LevelReport, TileSetReport};
