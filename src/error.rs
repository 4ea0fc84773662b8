use std::path::PathBuf;
use thiserror::Error;

/// The main error type for voc2coco operations.
///
/// Every variant is terminal for a run; nothing is retried.
#[derive(Debug, Error)]
pub enum Voc2CocoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output directory {path} already exists; choose a new --output-dir-path")]
    OutputDirExists { path: PathBuf },

    #[error("Unknown VOC class '{name}' in annotation for {file_name}")]
    UnknownCategory { name: String, file_name: String },

    #[error("Invalid image identifier: file name '{file_name}' must start with an integer stem")]
    InvalidImageId { file_name: String },

    #[error("Check failed for split '{split}': {check}")]
    CheckFailed { split: String, check: String },

    #[error("Failed to parse VOC XML {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Invalid VOC layout at {path}: {message}")]
    VocLayoutInvalid { path: PathBuf, message: String },

    #[error("Unsupported VOC year {year} (supported: 2007 to 2012)")]
    UnsupportedYear { year: u16 },

    #[error("Split '{split}' is not available for VOC{year} (missing {path})")]
    SplitUnavailable {
        split: String,
        year: u16,
        path: PathBuf,
    },

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("Failed to unpack archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write COCO JSON to {path}: {source}")]
    CocoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Image error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
