use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfo", about = "Overlay receipts onto letterhead", version)]
struct Cli {
    /// Log progress (set RUST_LOG for finer control)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place each foreground page on top of the matching background page
    Overlay {
        /// Foreground PDF (the receipt)
        #[arg(short, long)]
        foreground: PathBuf,

        /// Background PDF (the letterhead)
        #[arg(short, long)]
        background: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Move the foreground up (points)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        up: f32,

        /// Move the foreground down (points)
        #[arg(long, default_value = "170", allow_hyphen_values = true)]
        down: f32,

        /// Move the foreground left (points)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        left: f32,

        /// Move the foreground right (points)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        right: f32,

        /// Grow the foreground by this fraction (0.1 = 10%)
        #[arg(long, default_value = "0.05", allow_hyphen_values = true)]
        scale_increase: f32,

        /// Shrink the foreground by this fraction (0.1 = 10%)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        scale_decrease: f32,

        /// How to pad the shorter document
        #[arg(long, default_value = "repeat-last", value_enum)]
        padding: PaddingArg,

        /// Only adjust this page (1-based); other pages are merged as-is
        #[arg(long)]
        target_page: Option<usize>,

        /// Read options from a JSON file instead of the flags above
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Show page count and page sizes of a PDF
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaddingArg {
    RepeatLast,
    Blank,
}

impl From<PaddingArg> for pdf_overlay::ReconciliationPolicy {
    fn from(arg: PaddingArg) -> Self {
        match arg {
            PaddingArg::RepeatLast => Self::RepeatLastPage,
            PaddingArg::Blank => Self::BlankPad,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Overlay {
            foreground,
            background,
            output,
            up,
            down,
            left,
            right,
            scale_increase,
            scale_decrease,
            padding,
            target_page,
            config,
            save_config,
            stats_only,
        } => {
            let options = match config {
                Some(path) => pdf_overlay::OverlayOptions::load(&path)
                    .await
                    .with_context(|| format!("loading options from {}", path.display()))?,
                None => pdf_overlay::OverlayOptions {
                    adjustment: pdf_overlay::Adjustment {
                        up,
                        down,
                        left,
                        right,
                        scale_increase,
                        scale_decrease,
                    },
                    policy: padding.into(),
                    target_page,
                },
            };
            options.validate()?;

            if let Some(path) = save_config {
                options
                    .save(&path)
                    .await
                    .with_context(|| format!("saving options to {}", path.display()))?;
                println!("Saved options → {}", path.display());
            }

            let transform = options.transform();
            println!(
                "Transform: scale {}, dx {}, dy {}",
                transform.scale, transform.dx, transform.dy
            );

            if stats_only {
                let fg = load(&foreground, pdf_overlay::DocumentRole::Foreground).await?;
                let bg = load(&background, pdf_overlay::DocumentRole::Background).await?;
                let stats = pdf_overlay::calculate_statistics(&fg, &bg, &options)?;
                print_statistics(&stats);
                return Ok(());
            }

            let stats =
                pdf_overlay::overlay_files(&foreground, &background, &output, &options).await?;
            print_statistics(&stats);
            println!("Overlay → {}", output.display());
        }

        Commands::Info { input } => {
            let doc = load(&input, pdf_overlay::DocumentRole::Foreground).await?;
            println!("{}: {} pages", input.display(), doc.page_count());
            for (idx, (width, height)) in doc.dimensions().iter().enumerate() {
                println!("  Page {}: {} × {} pt", idx + 1, width, height);
            }
        }
    }

    Ok(())
}

async fn load(path: &Path, role: pdf_overlay::DocumentRole) -> Result<pdf_overlay::SourceDocument> {
    pdf_overlay::load_pdf(path, role)
        .await
        .with_context(|| format!("loading {}", path.display()))
}

fn print_statistics(stats: &pdf_overlay::OverlayStatistics) {
    println!("Overlay Statistics:");
    println!("  Foreground pages: {}", stats.foreground_pages);
    println!("  Background pages: {}", stats.background_pages);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Padded foreground pages: {}", stats.padded_foreground);
    println!("  Padded background pages: {}", stats.padded_background);
    println!("  Transformed pages: {}", stats.transformed_pages);
}
