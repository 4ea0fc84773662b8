//! Getting a VOC devkit onto disk.
//!
//! Each supported year maps to one or two tar archives. An archive is
//! skipped when its image lists are already unpacked, reused when its tar
//! file is already present, and downloaded otherwise.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use log::info;

use super::{VocDevkit, VocSplit};
use crate::error::Voc2CocoError;

const VOC_BASE_URL: &str = "http://host.robots.ox.ac.uk/pascal/VOC";

/// One downloadable tar archive of a VOC release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocArchive {
    pub url: String,
    pub file_name: &'static str,
    /// Image lists the archive provides once unpacked.
    pub splits: &'static [VocSplit],
}

/// The archives and unpacked layout of one VOC year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocRelease {
    pub year: u16,
    /// Directory, relative to the unpack root, holding `Annotations/`,
    /// `ImageSets/` and `JPEGImages/`.
    pub base_dir: &'static str,
    pub archives: Vec<VocArchive>,
}

const TRAINVAL_SPLITS: &[VocSplit] = &[VocSplit::Train, VocSplit::Val, VocSplit::TrainVal];
const TEST_SPLITS: &[VocSplit] = &[VocSplit::Test];

/// Archive table for a supported year.
///
/// Only 2007 publishes its test set; for other years the `test` list has to
/// be placed into the devkit by hand.
pub fn release(year: u16) -> Result<VocRelease, Voc2CocoError> {
    let (trainval_file, base_dir) = match year {
        2012 => ("VOCtrainval_11-May-2012.tar", "VOCdevkit/VOC2012"),
        2011 => ("VOCtrainval_25-May-2011.tar", "TrainVal/VOCdevkit/VOC2011"),
        2010 => ("VOCtrainval_03-May-2010.tar", "VOCdevkit/VOC2010"),
        2009 => ("VOCtrainval_11-May-2009.tar", "VOCdevkit/VOC2009"),
        2008 => ("VOCtrainval_14-Jul-2008.tar", "VOCdevkit/VOC2008"),
        2007 => ("VOCtrainval_06-Nov-2007.tar", "VOCdevkit/VOC2007"),
        _ => return Err(Voc2CocoError::UnsupportedYear { year }),
    };

    let mut archives = vec![archive(year, trainval_file, TRAINVAL_SPLITS)];
    if year == 2007 {
        archives.push(archive(year, "VOCtest_06-Nov-2007.tar", TEST_SPLITS));
    }

    Ok(VocRelease {
        year,
        base_dir,
        archives,
    })
}

fn archive(year: u16, file_name: &'static str, splits: &'static [VocSplit]) -> VocArchive {
    VocArchive {
        url: format!("{VOC_BASE_URL}/voc{year}/{file_name}"),
        file_name,
        splits,
    }
}

/// Make the devkit for `year` available under `root`.
///
/// Archives whose image lists are already unpacked are skipped; an archive
/// file already present in `root` is unpacked without downloading again.
/// Fails unless all four split lists exist afterwards.
pub fn acquire(root: &Path, year: u16) -> Result<VocDevkit, Voc2CocoError> {
    let release = release(year)?;
    fs::create_dir_all(root).map_err(Voc2CocoError::Io)?;
    let devkit = VocDevkit::new(root, &release);

    for archive in &release.archives {
        if archive
            .splits
            .iter()
            .all(|split| devkit.image_set_path(*split).is_file())
        {
            info!(
                "Found unpacked {} under {}; skipping",
                archive.file_name,
                devkit.base_dir.display()
            );
            continue;
        }

        let archive_path = root.join(archive.file_name);
        if archive_path.is_file() {
            info!("Reusing downloaded {}", archive_path.display());
        } else {
            download(&archive.url, &archive_path)?;
        }
        unpack(&archive_path, root)?;
    }

    devkit.ensure_splits_available()?;
    Ok(devkit)
}

#[cfg(feature = "download")]
fn download(url: &str, dest: &Path) -> Result<(), Voc2CocoError> {
    use std::io::{BufWriter, Write};

    info!("Downloading {url}");
    let download_err = |message: String| Voc2CocoError::Download {
        url: url.to_string(),
        message,
    };

    let response = ureq::get(url)
        .call()
        .map_err(|source| download_err(source.to_string()))?;

    // Stream into a sibling file so an interrupted download is never
    // mistaken for a complete archive on the next run.
    let partial = dest.with_extension("tar.part");
    let mut writer = BufWriter::new(File::create(&partial).map_err(Voc2CocoError::Io)?);
    let mut reader = response.into_body().into_reader();
    let bytes = std::io::copy(&mut reader, &mut writer)
        .map_err(|source| download_err(source.to_string()))?;
    writer.flush().map_err(Voc2CocoError::Io)?;
    drop(writer);

    fs::rename(&partial, dest).map_err(Voc2CocoError::Io)?;
    info!("Downloaded {} ({} bytes)", dest.display(), bytes);
    Ok(())
}

#[cfg(not(feature = "download"))]
fn download(url: &str, _dest: &Path) -> Result<(), Voc2CocoError> {
    Err(Voc2CocoError::Download {
        url: url.to_string(),
        message: "built without the `download` feature; unpack the devkit into the temporary path first"
            .to_string(),
    })
}

fn unpack(archive_path: &Path, dest: &Path) -> Result<(), Voc2CocoError> {
    info!("Unpacking {} into {}", archive_path.display(), dest.display());
    let file = File::open(archive_path).map_err(Voc2CocoError::Io)?;
    let mut archive = tar::Archive::new(BufReader::new(file));
    archive
        .unpack(dest)
        .map_err(|source| Voc2CocoError::Archive {
            path: archive_path.to_path_buf(),
            source,
        })
}
