//! Per-split conversion summary, logged after each split is built and
//! printed at the end of a run.

use std::collections::BTreeMap;
use std::fmt;

use crate::categories::CategoryMap;
use crate::dataset::VocSplit;
use crate::ir::{CategoryId, CocoDataset};

/// Counts describing one converted split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitSummary {
    pub split: VocSplit,
    pub images: usize,
    pub annotations: usize,
    /// Annotation count per category id; categories with no annotations are
    /// absent.
    pub per_category: BTreeMap<CategoryId, usize>,
}

impl SplitSummary {
    pub fn from_dataset(split: VocSplit, dataset: &CocoDataset) -> Self {
        let mut per_category = BTreeMap::new();
        for ann in &dataset.annotations {
            *per_category.entry(ann.category_id).or_insert(0) += 1;
        }
        Self {
            split,
            images: dataset.images.len(),
            annotations: dataset.annotations.len(),
            per_category,
        }
    }

    /// Human-readable per-class breakdown, in category id order.
    pub fn category_breakdown(&self, categories: &CategoryMap) -> String {
        self.per_category
            .iter()
            .map(|(id, count)| {
                let name = categories.name_of(*id).unwrap_or("?");
                format!("{name}={count}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} {} images, {} annotations",
            self.split.as_str(),
            self.images,
            self.annotations
        )
    }
}
