use std::{path::PathBuf, str::FromStr as _};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "glowbox", version, about = "Render the bloom demo scene to a PNG")]
struct Cli {
    /// Output PNG path.
    #[arg(long, default_value = "output.png")]
    out: PathBuf,

    /// Optional JSON file overriding scene and bloom parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by `GLOWBOX_LOG`).
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let cfg = match &cli.config {
        Some(path) => glowbox::DemoConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => glowbox::DemoConfig::default(),
    };

    let frame = glowbox::render_demo(&cfg.scene, &cfg.bloom).context("render bloom scene")?;

    glowbox::save_png(&frame, &cli.out)
        .with_context(|| format!("write png '{}'", cli.out.display()))?;

    tracing::info!("wrote {}", cli.out.display());
    Ok(())
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = match std::env::var("GLOWBOX_LOG") {
        Ok(v) => tracing::Level::from_str(v.trim())
            .map_err(|_| anyhow::anyhow!("GLOWBOX_LOG must be one of trace|debug|info|warn|error"))?,
        Err(_) if verbose => tracing::Level::DEBUG,
        Err(_) => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
