mod demo;

use anyhow::Context;
use clap::Parser;
use sprig::{Config, GameApp};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sprig", about = "Sprig 2D runtime demo")]
struct Args {
    /// TOML settings file; built-in defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integer window scale, overriding the config file
    #[arg(long)]
    scale: Option<u32>,

    /// Directory to load sheets from, overriding the config file
    #[arg(long)]
    content: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if let Some(content) = args.content {
        config.content_dir = content;
    }

    GameApp::new(config)
        .run(|assets| Ok(Box::new(demo::Title::new(assets)?)))
        .context("running the demo")?;
    Ok(())
}
