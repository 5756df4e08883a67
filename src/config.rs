use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tui-curves",
    version,
    about = "Real-time sine-lattice curve renderer for true-color terminals"
)]
pub struct Config {
    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    /// Refresh rate the frame loop paces itself to.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,

    /// How long a key counts as held after its last press or repeat, on
    /// terminals that do not report key releases.
    #[arg(long, default_value_t = 400)]
    pub hold_ms: u64,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub hud: bool,

    #[arg(long, default_value = "/tmp/tui_curves.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
    #[value(alias = "hires", alias = "dots")]
    Braille,
}

impl Config {
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(1.0 / self.fps.max(1) as f32)
    }
}
