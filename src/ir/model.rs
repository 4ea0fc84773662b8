//! Record types on both sides of the conversion.
//!
//! `VocRecord` is what the loader parses out of one `Annotations/*.xml`
//! file. `CocoDataset` is one split document exactly as it is written to
//! `instances_<split>.json`: field declaration order is the JSON key order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bbox::{CocoBBox, VocBndBox};
use super::ids::{AnnotationId, CategoryId, ImageId};

/// One VOC annotation file: image metadata plus its labeled objects.
#[derive(Clone, Debug, PartialEq)]
pub struct VocRecord {
    /// The `<filename>` element, e.g. `000001.jpg`.
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub depth: Option<u32>,
    pub objects: Vec<VocObject>,
}

impl VocRecord {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
            depth: None,
            objects: Vec::new(),
        }
    }

    /// Appends an object with no extra attributes.
    pub fn with_object(mut self, name: impl Into<String>, bndbox: VocBndBox) -> Self {
        self.objects.push(VocObject::new(name, bndbox));
        self
    }
}

/// A labeled `<object>` inside a VOC annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct VocObject {
    /// Class name, e.g. `cat`.
    pub name: String,
    pub bndbox: VocBndBox,
    /// Optional flags found on the object (`pose`, `truncated`, `difficult`,
    /// `occluded`), kept verbatim.
    pub attributes: BTreeMap<String, String>,
}

impl VocObject {
    pub fn new(name: impl Into<String>, bndbox: VocBndBox) -> Self {
        Self {
            name: name.into(),
            bndbox,
            attributes: BTreeMap::new(),
        }
    }
}

/// A complete COCO split document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CocoDataset {
    pub info: CocoInfo,
    pub categories: Vec<CocoCategory>,
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
    /// Always empty for VOC conversions.
    #[serde(default)]
    pub licenses: Vec<CocoLicense>,
}

impl CocoDataset {
    /// Creates a document with the shared header and no images yet.
    pub fn new(info: CocoInfo, categories: Vec<CocoCategory>) -> Self {
        Self {
            info,
            categories,
            images: Vec::new(),
            annotations: Vec::new(),
            licenses: Vec::new(),
        }
    }
}

/// COCO dataset info block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CocoInfo {
    pub description: String,
    pub url: String,
    /// Written as a JSON number (`1.0`).
    pub version: f64,
    pub year: u32,
    /// Local date in `YYYY/MM/DD` form.
    pub date_created: String,
}

/// COCO license entry. Never produced, accepted when reading.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CocoLicense {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// COCO category entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CocoCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub supercategory: String,
}

/// COCO image entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CocoImage {
    pub id: ImageId,
    pub file_name: String,
    /// Path of the image relative to the output root, e.g. `images/000001.jpg`.
    #[serde(default)]
    pub coco_url: String,
    pub width: u32,
    pub height: u32,
}

/// COCO annotation entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CocoAnnotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    pub category_id: CategoryId,
    pub bbox: CocoBBox,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub iscrowd: u8,
}

impl CocoAnnotation {
    /// Creates a non-crowd annotation whose area is derived from the box.
    pub fn new(
        id: impl Into<AnnotationId>,
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: CocoBBox,
    ) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox,
            area: bbox.area(),
            iscrowd: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> CocoInfo {
        CocoInfo {
            description: "voc2007 dataset".into(),
            url: "http://host.robots.ox.ac.uk/pascal/VOC/voc2007/".into(),
            version: 1.0,
            year: 2007,
            date_created: "2024/01/02".into(),
        }
    }

    #[test]
    fn test_annotation_area_follows_bbox() {
        let ann = CocoAnnotation::new(0u64, 1u64, 8u64, CocoBBox::new(9.0, 19.0, 101.0, 201.0));
        assert_eq!(ann.area, 20301.0);
        assert_eq!(ann.iscrowd, 0);
    }

    #[test]
    fn test_document_key_order_is_declaration_order() {
        let mut doc = CocoDataset::new(
            sample_info(),
            vec![CocoCategory {
                id: CategoryId(0),
                name: "background".into(),
                supercategory: "background".into(),
            }],
        );
        doc.images.push(CocoImage {
            id: ImageId(1),
            file_name: "000001.jpg".into(),
            coco_url: "images/000001.jpg".into(),
            width: 500,
            height: 375,
        });

        let json = serde_json::to_string(&doc).expect("serialize document");
        let info = json.find("\"info\"").expect("info key");
        let categories = json.find("\"categories\"").expect("categories key");
        let images = json.find("\"images\"").expect("images key");
        let annotations = json.find("\"annotations\"").expect("annotations key");
        let licenses = json.find("\"licenses\"").expect("licenses key");
        assert!(info < categories && categories < images);
        assert!(images < annotations && annotations < licenses);
        assert!(json.contains(
            r#"{"id":1,"file_name":"000001.jpg","coco_url":"images/000001.jpg","width":500,"height":375}"#
        ));
        assert!(json.ends_with(r#""licenses":[]}"#));
    }

    #[test]
    fn test_record_builder_collects_objects() {
        let record = VocRecord::new("000001.jpg", 500, 375)
            .with_object("cat", VocBndBox::new(10.0, 20.0, 110.0, 220.0))
            .with_object("dog", VocBndBox::new(1.0, 1.0, 5.0, 5.0));
        assert_eq!(record.objects.len(), 2);
        assert_eq!(record.objects[1].name, "dog");
        assert!(record.objects[0].attributes.is_empty());
    }
}
