//! Run configuration and the context value threaded through every stage.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::categories::CategoryMap;
use crate::dataset::VocSplit;
use crate::error::Voc2CocoError;
use crate::ir::CocoInfo;
use crate::verify::Palette;

/// Name of the relocated image directory under the output root.
pub const IMAGES_DIR_NAME: &str = "images";

/// Default temporary directory name under the output root.
pub const DEFAULT_TEMPORARY_DIR_NAME: &str = "tmp";

/// Default dataset year.
pub const DEFAULT_YEAR: u16 = 2012;

/// Where a run reads from and writes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub year: u16,
    pub temporary_path: PathBuf,
    /// True when `temporary_path` was derived from `output_dir`; the whole
    /// directory is then removed once images are relocated.
    pub temporary_is_default: bool,
}

impl RunConfig {
    pub fn new(output_dir: impl Into<PathBuf>, year: u16, temporary_path: Option<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let temporary_is_default = temporary_path.is_none();
        let temporary_path =
            temporary_path.unwrap_or_else(|| output_dir.join(DEFAULT_TEMPORARY_DIR_NAME));
        Self {
            output_dir,
            year,
            temporary_path,
            temporary_is_default,
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join(IMAGES_DIR_NAME)
    }

    /// `<output>/instances_<split>.json`
    pub fn instances_path(&self, split: VocSplit) -> PathBuf {
        self.output_dir
            .join(format!("instances_{}.json", split.as_str()))
    }

    /// `<output>/imagesGt_<split>`
    pub fn preview_dir(&self, split: VocSplit) -> PathBuf {
        self.output_dir.join(format!("imagesGt_{}", split.as_str()))
    }

    /// Fails if the output directory already exists, then creates it.
    ///
    /// Nothing on disk is touched when the check fails.
    pub fn create_output_dir(&self) -> Result<(), Voc2CocoError> {
        if self.output_dir.exists() {
            return Err(Voc2CocoError::OutputDirExists {
                path: self.output_dir.clone(),
            });
        }
        fs::create_dir_all(&self.output_dir).map_err(Voc2CocoError::Io)
    }
}

/// Everything the stages share: configuration, the category vocabulary,
/// the `info` block written into every split, and the preview palette.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub config: RunConfig,
    pub categories: CategoryMap,
    pub info: CocoInfo,
    pub palette: Palette,
}

impl RunContext {
    /// Checks the output precondition, creates the output directory, and
    /// builds the context for today's date with a fresh random palette.
    pub fn prepare(config: RunConfig) -> Result<Self, Voc2CocoError> {
        config.create_output_dir()?;
        info!("Created output directory {}", config.output_dir.display());

        let date_created = chrono::Local::now().format("%Y/%m/%d").to_string();
        let categories = CategoryMap::voc();
        let palette = Palette::random(&categories);
        Ok(Self::with_parts(config, categories, &date_created, palette))
    }

    /// Builds a context without touching the filesystem.
    pub fn with_parts(
        config: RunConfig,
        categories: CategoryMap,
        date_created: &str,
        palette: Palette,
    ) -> Self {
        let info = voc_info(config.year, date_created);
        Self {
            config,
            categories,
            info,
            palette,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }
}

/// The `info` block for a VOC year.
pub fn voc_info(year: u16, date_created: &str) -> CocoInfo {
    CocoInfo {
        description: format!("voc{year} dataset"),
        url: format!("http://host.robots.ox.ac.uk/pascal/VOC/voc{year}/"),
        version: 1.0,
        year: u32::from(year),
        date_created: date_created.to_string(),
    }
}
