mod app;
mod panel;
mod theme;

use anyhow::{Context, Result};

use glowdeck_engine::device::GpuInit;
use glowdeck_engine::logging::{LoggingConfig, init_logging};
use glowdeck_engine::text::FontSystem;
use glowdeck_engine::window::{Runtime, RuntimeConfig};

use app::StudioApp;

const DEFAULT_ASSET: &str = "assets/tablet.glb";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let asset_path = args.next().unwrap_or_else(|| DEFAULT_ASSET.to_string());
    let server_url = args.next().unwrap_or_else(|| DEFAULT_SERVER.to_string());
    log::info!("asset: {asset_path}, server: {server_url}");

    let mut fonts = FontSystem::new();
    let font = fonts
        .load_font(&load_font_bytes())
        .context("no usable UI font found")?;

    let app = StudioApp::new(fonts, font, asset_path, &server_url);

    Runtime::run(
        RuntimeConfig {
            title: "Glowdeck".to_string(),
            ..RuntimeConfig::default()
        },
        GpuInit::default(),
        app,
    )
}

fn load_font_bytes() -> Vec<u8> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .unwrap_or_default()
}
