use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Generate favicon PNGs, the apple-touch-icon, and the social preview image
/// from the site's SVG templates.
#[derive(Parser, Debug)]
#[command(name = "favgen", version)]
struct Cli {
    /// Directory containing favicon.svg and logo.svg.
    #[arg(long, default_value = "public")]
    assets: PathBuf,

    /// Output directory. Defaults to the assets directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Title text on the preview card.
    #[arg(long, default_value = "Example")]
    title: String,

    /// URL line on the preview card.
    #[arg(long, default_value = "example.com")]
    url: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let out_dir = cli.out.unwrap_or_else(|| cli.assets.clone());
    let config = favgen::BatchConfig {
        assets_dir: cli.assets,
        out_dir,
        title: cli.title,
        url: cli.url,
    };

    let mut batch = favgen::Batch::new(config);
    let summary = batch.run().context("asset generation failed")?;

    eprintln!("wrote {} assets", summary.written.len());
    Ok(())
}
