//! COCO JSON reader and writer for split documents.
//!
//! # COCO Format Reference
//!
//! COCO bounding boxes use `[x, y, width, height]` format where:
//! - `(x, y)` is the top-left corner in absolute pixel coordinates
//! - `width` and `height` are the dimensions
//!
//! # Deterministic Output
//!
//! Keys are written in struct declaration order (never sorted) and lists in
//! the order they were built, indented by four spaces. Non-ASCII text is
//! written verbatim as UTF-8.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::model::CocoDataset;
use crate::error::Voc2CocoError;

const INDENT: &[u8] = b"    ";

/// Reads a split document from a COCO JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use voc2coco::ir::io_coco_json::read_coco_json;
///
/// let dataset = read_coco_json(Path::new("instances_train.json"))?;
/// # Ok::<(), voc2coco::Voc2CocoError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<CocoDataset, Voc2CocoError> {
    let file = File::open(path).map_err(Voc2CocoError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| Voc2CocoError::CocoJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a split document to a COCO JSON file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_coco_json(path: &Path, dataset: &CocoDataset) -> Result<(), Voc2CocoError> {
    let file = File::create(path).map_err(Voc2CocoError::Io)?;
    let writer = BufWriter::new(file);

    let mut writer = serialize_pretty(writer, dataset).map_err(|source| {
        Voc2CocoError::CocoJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(Voc2CocoError::Io)
}

/// Reads a split document from a COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<CocoDataset, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a split document from a COCO JSON byte slice.
pub fn from_coco_slice(bytes: &[u8]) -> Result<CocoDataset, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a split document to a COCO JSON string, formatted exactly like
/// [`write_coco_json`].
pub fn to_coco_string(dataset: &CocoDataset) -> Result<String, serde_json::Error> {
    let buffer = serialize_pretty(Vec::new(), dataset)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn serialize_pretty<W: Write>(writer: W, dataset: &CocoDataset) -> Result<W, serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    dataset.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}
