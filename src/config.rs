use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::app::BuildMode;
use crate::page::READY_EVENT;

/// What to write to `--out`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The whole host page with every anchor
    Html,
    /// Only the first drawn map
    Svg,
}

/// `eclipse-map` - draws the Australia solar eclipse map (and a world map)
/// into a static page.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Directory holding `australia.geo.json`, the `{year}-eclipse.geo.json`
    /// overlays and, for the world map, `world.geo.json`.
    #[arg(long, env = "ECLIPSE_MAP_DATA", default_value = "data")]
    pub data_dir: PathBuf,

    /// Where to write the rendered page. Stdout when omitted.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Anchor ids present in the host page. Maps whose anchor is missing
    /// are not drawn.
    #[arg(long = "anchor", default_values_t = [String::from("australiamap")])]
    pub anchors: Vec<String>,

    /// Production propagates mount errors; development shows them in place
    /// of the map.
    #[arg(long, value_enum, env = "ECLIPSE_MAP_MODE", default_value_t = BuildMode::Production)]
    pub mode: BuildMode,

    /// The host has already set its ready flag, so draw without waiting
    /// for the ready event.
    #[arg(long)]
    pub ready: bool,

    /// Name of the host's readiness event
    #[arg(long, default_value = READY_EVENT)]
    pub ready_event: String,

    /// JSON manifest mapping stylesheet names to class tokens
    #[arg(long, env = "ECLIPSE_MAP_STYLES")]
    pub styles: Option<PathBuf>,

    /// Watch the data directory and redraw on change (development only)
    #[arg(long)]
    pub watch: bool,

    /// Show the first map in the terminal after rendering
    #[arg(long)]
    pub preview: bool,
}
