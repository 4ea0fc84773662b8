//! Loading VOC splits from an unpacked devkit.
//!
//! [`acquire`] owns getting the devkit onto disk (download + unpack, or
//! reuse of an existing tree). This module only reads what is there.

pub mod acquire;

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::Voc2CocoError;
use crate::ir::io_voc_xml::{read_image_set, read_voc_xml};
use crate::ir::VocRecord;

pub use acquire::{acquire, release, VocArchive, VocRelease};

/// The four standard VOC image sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VocSplit {
    Train,
    Val,
    TrainVal,
    Test,
}

impl VocSplit {
    /// Conversion order.
    pub const ALL: [VocSplit; 4] = [
        VocSplit::Train,
        VocSplit::Val,
        VocSplit::TrainVal,
        VocSplit::Test,
    ];

    /// Splits that are re-read and rendered after writing.
    pub const VERIFIED: [VocSplit; 2] = [VocSplit::TrainVal, VocSplit::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            VocSplit::Train => "train",
            VocSplit::Val => "val",
            VocSplit::TrainVal => "trainval",
            VocSplit::Test => "test",
        }
    }
}

impl fmt::Display for VocSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths inside an unpacked devkit for one year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocDevkit {
    pub year: u16,
    /// The temporary directory archives were unpacked into.
    pub root: PathBuf,
    /// `<root>/VOCdevkit/VOC<year>` (or the year's variant of it).
    pub base_dir: PathBuf,
    /// First directory under `root` that the archives create; deleted once
    /// images are relocated.
    pub extraction_root: PathBuf,
}

impl VocDevkit {
    /// Devkit layout for a release unpacked under `root`.
    pub fn new(root: &Path, release: &VocRelease) -> Self {
        let base_rel = Path::new(release.base_dir);
        let extraction_root = base_rel
            .components()
            .next()
            .map(|first| root.join(first))
            .unwrap_or_else(|| root.to_path_buf());
        Self {
            year: release.year,
            root: root.to_path_buf(),
            base_dir: root.join(base_rel),
            extraction_root,
        }
    }

    pub fn annotations_dir(&self) -> PathBuf {
        self.base_dir.join("Annotations")
    }

    pub fn jpeg_images_dir(&self) -> PathBuf {
        self.base_dir.join("JPEGImages")
    }

    /// `ImageSets/Main/<split>.txt`
    pub fn image_set_path(&self, split: VocSplit) -> PathBuf {
        self.base_dir
            .join("ImageSets")
            .join("Main")
            .join(format!("{}.txt", split.as_str()))
    }

    pub fn annotation_path(&self, stem: &str) -> PathBuf {
        self.annotations_dir().join(format!("{stem}.xml"))
    }

    /// Fails with the first split whose image list is missing.
    pub fn ensure_splits_available(&self) -> Result<(), Voc2CocoError> {
        if !self.annotations_dir().is_dir() {
            return Err(Voc2CocoError::VocLayoutInvalid {
                path: self.base_dir.clone(),
                message: "expected an Annotations/ directory".to_string(),
            });
        }

        for split in VocSplit::ALL {
            let path = self.image_set_path(split);
            if !path.is_file() {
                return Err(Voc2CocoError::SplitUnavailable {
                    split: split.to_string(),
                    year: self.year,
                    path,
                });
            }
        }
        Ok(())
    }
}

/// Read every annotation of a split, in image-list order.
pub fn load_split(devkit: &VocDevkit, split: VocSplit) -> Result<Vec<VocRecord>, Voc2CocoError> {
    let list_path = devkit.image_set_path(split);
    let stems = read_image_set(&list_path)?;
    if stems.is_empty() {
        warn!("Image list {} is empty", list_path.display());
    }

    let mut records = Vec::with_capacity(stems.len());
    for stem in &stems {
        let xml_path = devkit.annotation_path(stem);
        debug!("[{split}] parsing {}", xml_path.display());
        records.push(read_voc_xml(&xml_path)?);
    }

    info!("[{split}] loaded {} annotation files", records.len());
    Ok(records)
}
