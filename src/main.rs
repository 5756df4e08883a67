use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;

fn main() -> Result<()> {
    let cfg = tui_curves::config::Config::parse();

    // The terminal belongs to the renderer, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&cfg.log_file)
        .with_context(|| format!("open log file {}", cfg.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    tui_curves::app::run(cfg)
}
