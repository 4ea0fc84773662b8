//! Writing split documents and assembling the output tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::context::RunContext;
use crate::dataset::{VocDevkit, VocSplit};
use crate::error::Voc2CocoError;
use crate::ir::io_coco_json::write_coco_json;
use crate::ir::CocoDataset;

/// Write `instances_<split>.json` for one split and return its path.
pub fn write_split(
    ctx: &RunContext,
    split: VocSplit,
    dataset: &CocoDataset,
) -> Result<PathBuf, Voc2CocoError> {
    let path = ctx.config.instances_path(split);
    info!("[{split}] writing {}", path.display());
    write_coco_json(&path, dataset)?;
    Ok(path)
}

/// Move the devkit's `JPEGImages/` to `<output>/images`, then delete what
/// is left of the unpacked devkit.
///
/// When the temporary directory is the default one inside the output root
/// it is removed entirely, downloaded archives included.
pub fn relocate_images(ctx: &RunContext, devkit: &VocDevkit) -> Result<PathBuf, Voc2CocoError> {
    let images_dir = ctx.config.images_dir();
    let source = devkit.jpeg_images_dir();
    info!(
        "Moving {} to {}",
        source.display(),
        images_dir.display()
    );
    move_dir(&source, &images_dir).map_err(Voc2CocoError::Io)?;

    info!("Removing {}", devkit.extraction_root.display());
    fs::remove_dir_all(&devkit.extraction_root).map_err(Voc2CocoError::Io)?;

    if ctx.config.temporary_is_default && ctx.config.temporary_path.exists() {
        info!("Removing {}", ctx.config.temporary_path.display());
        fs::remove_dir_all(&ctx.config.temporary_path).map_err(Voc2CocoError::Io)?;
    }

    Ok(images_dir)
}

/// Rename a directory, falling back to copy-then-delete when the two paths
/// are on different filesystems.
fn move_dir(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            debug!("rename across filesystems failed ({err}); copying instead");
            copy_dir_all(from, to)?;
            fs::remove_dir_all(from)
        }
        Err(err) => Err(err),
    }
}

fn copy_dir_all(from: &Path, to: &Path) -> io::Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(io::Error::other)?;
        let target = to.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
