//! Record types and file formats for the VOC to COCO conversion.
//!
//! The VOC side is parsed into [`VocRecord`]s (one per annotation XML); the
//! COCO side is built as a [`CocoDataset`] per split and written verbatim.
//! Nothing in between is format-agnostic: the conversion is one direction
//! only.
//!
//! # Example
//!
//! ```
//! use voc2coco::ir::{CocoAnnotation, VocBndBox};
//!
//! let bbox = VocBndBox::new(10.0, 20.0, 110.0, 220.0).to_coco();
//! let ann = CocoAnnotation::new(0u64, 1u64, 8u64, bbox);
//! assert_eq!(ann.bbox.to_array(), [9.0, 19.0, 101.0, 201.0]);
//! assert_eq!(ann.area, 20301.0);
//! ```

mod bbox;
pub mod coco_index;
mod ids;
pub mod io_coco_json;
pub mod io_voc_xml;
mod model;

// Re-export core types for convenient access
pub use bbox::{CocoBBox, VocBndBox};
pub use coco_index::CocoIndex;
pub use ids::{AnnotationId, CategoryId, ImageId};
pub use model::{
    CocoAnnotation, CocoCategory, CocoDataset, CocoImage, CocoInfo, CocoLicense, VocObject,
    VocRecord,
};
