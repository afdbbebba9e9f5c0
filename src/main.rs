use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use walltint::backends::{Platform, ThemeManager};
use walltint::cli::Args;
use walltint::pipeline::extract::ExtractOptions;
use walltint::pipeline::Analyzer;
use walltint::preview;
use walltint::theme::Mode;
use walltint::tui;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.list_platforms {
        println!("Supported platforms:");
        for platform in Platform::ALL {
            println!("  {platform}");
        }
        return Ok(());
    }

    let Some(image) = args.image else {
        bail!("image path required (see --help)");
    };
    if !image.exists() {
        bail!("file not found: {}", image.display());
    }

    let options = ExtractOptions {
        num_colors: args.colors,
        tolerance: args.tolerance,
    };
    let mut analyzer = Analyzer::with_options(&image, options);
    let result = analyzer.analyze();

    preview::print_results(&result);
    if args.preview {
        for mode in Mode::ALL {
            println!();
            preview::print_palette(result.theme(mode));
        }
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nAnalysis written to {}", path.display());
    }

    if args.tui {
        return tui::run(tui::TuiApp::new(result));
    }

    if args.apply {
        let platform = args
            .platform
            .or_else(Platform::detect)
            .context("could not detect platform; pass --platform")?;
        let mode = args
            .mode
            .unwrap_or_else(|| Mode::from_primary(result.theme(Mode::Light).primary));
        info!(%platform, %mode, "applying theme");

        let manager = ThemeManager::new(platform);
        manager.apply(result.theme(mode), Some(&image))?;
        println!("\nTheme applied for {platform} ({mode})");
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "walltint=debug" } else { "walltint=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
