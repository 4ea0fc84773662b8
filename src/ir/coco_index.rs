//! Indexed, read-only view over a COCO ground-truth file.
//!
//! Lookup semantics follow the reference COCO API: categories and images
//! are listed in file order (a repeated image id keeps its first position
//! and its last record), and each image's annotations are returned in file
//! order.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::ids::{CategoryId, ImageId};
use super::model::{CocoAnnotation, CocoCategory, CocoImage};
use crate::error::Voc2CocoError;

/// The parts of a COCO file a ground-truth reader needs. `info` and
/// `licenses` are ignored.
#[derive(Debug, Default, Deserialize)]
struct GroundTruthFile {
    #[serde(default)]
    images: Vec<CocoImage>,
    #[serde(default)]
    annotations: Vec<CocoAnnotation>,
    #[serde(default)]
    categories: Vec<CocoCategory>,
}

/// The top level must be a JSON object; a derived struct alone would also
/// accept a sequence.
fn ground_truth_from_value(value: Value) -> Result<GroundTruthFile, serde_json::Error> {
    if !value.is_object() {
        return Err(serde::de::Error::custom(
            "expected a JSON object at the top level of a COCO file",
        ));
    }
    serde_json::from_value(value)
}

/// A loaded COCO ground-truth file with lookup tables.
#[derive(Debug)]
pub struct CocoIndex {
    categories: Vec<CocoCategory>,
    annotations: Vec<CocoAnnotation>,
    /// image ids in first-seen order
    image_order: Vec<ImageId>,
    images: HashMap<ImageId, CocoImage>,
    /// cat_id -> index into categories
    cats: HashMap<CategoryId, usize>,
    /// img_id -> indices into annotations
    img_to_anns: HashMap<ImageId, Vec<usize>>,
}

impl CocoIndex {
    /// Load a COCO annotation file and build its indices.
    pub fn open(path: &Path) -> Result<Self, Voc2CocoError> {
        let file = File::open(path).map_err(Voc2CocoError::Io)?;
        let reader = BufReader::new(file);
        let parsed = serde_json::from_reader(reader)
            .and_then(ground_truth_from_value)
            .map_err(|source| Voc2CocoError::CocoJsonParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::build(parsed))
    }

    /// Build an index from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let parsed = serde_json::from_str(json).and_then(ground_truth_from_value)?;
        Ok(Self::build(parsed))
    }

    fn build(file: GroundTruthFile) -> Self {
        let mut image_order = Vec::with_capacity(file.images.len());
        let mut images = HashMap::with_capacity(file.images.len());
        for image in file.images {
            let id = image.id;
            if images.insert(id, image).is_none() {
                image_order.push(id);
            }
        }

        let cats = file
            .categories
            .iter()
            .enumerate()
            .map(|(idx, cat)| (cat.id, idx))
            .collect();

        let mut img_to_anns: HashMap<ImageId, Vec<usize>> = HashMap::new();
        for (idx, ann) in file.annotations.iter().enumerate() {
            img_to_anns.entry(ann.image_id).or_default().push(idx);
        }

        Self {
            categories: file.categories,
            annotations: file.annotations,
            image_order,
            images,
            cats,
            img_to_anns,
        }
    }

    /// All categories, in file order.
    pub fn categories(&self) -> &[CocoCategory] {
        &self.categories
    }

    /// Category names, in file order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|cat| cat.name.as_str()).collect()
    }

    /// Supercategory names, in file order.
    pub fn supercategory_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|cat| cat.supercategory.as_str())
            .collect()
    }

    pub fn category(&self, id: CategoryId) -> Option<&CocoCategory> {
        self.cats.get(&id).map(|&idx| &self.categories[idx])
    }

    /// Image ids in first-seen order.
    pub fn image_ids(&self) -> &[ImageId] {
        &self.image_order
    }

    pub fn image(&self, id: ImageId) -> Option<&CocoImage> {
        self.images.get(&id)
    }

    /// Images in first-seen order.
    pub fn images(&self) -> impl Iterator<Item = &CocoImage> + '_ {
        self.image_order
            .iter()
            .filter_map(move |id| self.images.get(id))
    }

    /// Annotations attached to an image, in file order.
    pub fn annotations_for_image(&self, id: ImageId) -> Vec<&CocoAnnotation> {
        self.img_to_anns
            .get(&id)
            .map(|indices| indices.iter().map(|&idx| &self.annotations[idx]).collect())
            .unwrap_or_default()
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}
