//! voc2coco: PASCAL VOC detection annotations to COCO JSON.
//!
//! A run acquires a VOC devkit for one year, converts the `train`, `val`,
//! `trainval` and `test` image sets into COCO instance files, moves the
//! JPEG images next to them, and renders ground-truth previews for
//! `trainval` and `test` as a visual check.
//!
//! # Modules
//!
//! - [`ir`]: VOC and COCO record types, readers and writers
//! - [`dataset`]: devkit acquisition and split loading
//! - [`conversion`]: VOC records to COCO documents
//! - [`output`]: writing splits and assembling the output tree
//! - [`verify`]: re-reading splits and drawing previews
//! - [`error`]: Error types for voc2coco operations

pub mod categories;
pub mod context;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod ir;
pub mod output;
pub mod verify;

use std::path::PathBuf;

use clap::Parser;
use log::info;

pub use context::{RunConfig, RunContext};
pub use conversion::SplitSummary;
pub use dataset::VocSplit;
pub use error::Voc2CocoError;
pub use verify::VerifySummary;

/// The voc2coco CLI application.
#[derive(Parser)]
#[command(name = "voc2coco")]
#[command(version, author, about)]
struct Cli {
    /// Output directory; must not exist yet.
    #[arg(short = 'o', long = "output-dir-path")]
    output_dir_path: PathBuf,

    /// VOC dataset year.
    #[arg(
        short = 'y',
        long,
        default_value_t = context::DEFAULT_YEAR,
        value_parser = clap::value_parser!(u16).range(2007..=2012)
    )]
    year: u16,

    /// Where archives are downloaded and unpacked [default: <output>/tmp].
    #[arg(short = 't', long, env = "VOC2COCO_TEMPORARY_PATH")]
    temporary_path: Option<PathBuf>,
}

/// Everything a finished run produced.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub images_dir: PathBuf,
    pub splits: Vec<SplitSummary>,
    pub verified: Vec<VerifySummary>,
}

/// Run the voc2coco CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Voc2CocoError> {
    let cli = Cli::parse();
    let config = RunConfig::new(cli.output_dir_path, cli.year, cli.temporary_path);
    let report = run_pipeline(config)?;

    println!("Converted VOC into {}", report.output_dir.display());
    for summary in &report.splits {
        println!("  {summary}");
    }
    for verified in &report.verified {
        println!(
            "  imagesGt_{}: {} previews",
            verified.split, verified.previews
        );
    }
    Ok(())
}

/// Execute a whole conversion: acquire, convert, write, relocate, verify.
///
/// The output directory check happens before anything is downloaded, and
/// all four splits are converted before the first one is written.
pub fn run_pipeline(config: RunConfig) -> Result<RunReport, Voc2CocoError> {
    let ctx = RunContext::prepare(config)?;
    info!(
        "Converting VOC{} into {}",
        ctx.config.year,
        ctx.output_dir().display()
    );

    let devkit = dataset::acquire(&ctx.config.temporary_path, ctx.config.year)?;

    // Convert all splits before writing any.
    let mut converted = Vec::with_capacity(VocSplit::ALL.len());
    for split in VocSplit::ALL {
        converted.push(convert(&ctx, &devkit, split)?);
    }

    let mut splits = Vec::with_capacity(converted.len());
    for (summary, coco) in converted {
        output::write_split(&ctx, summary.split, &coco)?;
        splits.push(summary);
    }

    let images_dir = output::relocate_images(&ctx, &devkit)?;

    let mut verified = Vec::with_capacity(VocSplit::VERIFIED.len());
    for split in VocSplit::VERIFIED {
        verified.push(verify::verify_split(&ctx, split)?);
    }

    info!("Done: {}", ctx.output_dir().display());
    Ok(RunReport {
        output_dir: ctx.output_dir().to_path_buf(),
        images_dir,
        splits,
        verified,
    })
}

fn convert(
    ctx: &RunContext,
    devkit: &dataset::VocDevkit,
    split: VocSplit,
) -> Result<(SplitSummary, ir::CocoDataset), Voc2CocoError> {
    let records = dataset::load_split(devkit, split)?;
    let coco = conversion::convert_split(&records, ctx)?;

    let summary = SplitSummary::from_dataset(split, &coco);
    info!("{summary}");
    info!("[{split}] {}", summary.category_breakdown(&ctx.categories));
    Ok((summary, coco))
}
