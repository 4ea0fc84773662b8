//! The fixed VOC category vocabulary.
//!
//! Category ids are positions in [`VOC_CATEGORY_NAMES`]: `background` is 0
//! and is declared in every split but never assigned to an object.

use std::collections::HashMap;

use crate::ir::{CategoryId, CocoCategory};

/// The background pseudo-class at id 0.
pub const BACKGROUND: &str = "background";

/// All 21 category names in id order.
/// See <http://host.robots.ox.ac.uk/pascal/VOC/voc2007/dbstats.html>.
pub const VOC_CATEGORY_NAMES: [&str; 21] = [
    BACKGROUND,
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

/// Name <-> id mapping over the VOC vocabulary.
#[derive(Clone, Debug)]
pub struct CategoryMap {
    by_name: HashMap<&'static str, CategoryId>,
}

impl CategoryMap {
    pub fn voc() -> Self {
        let by_name = VOC_CATEGORY_NAMES
            .iter()
            .enumerate()
            .map(|(idx, &name)| (name, CategoryId::new(idx as u64)))
            .collect();
        Self { by_name }
    }

    /// Names in id order, `background` first.
    pub fn names(&self) -> &'static [&'static str] {
        &VOC_CATEGORY_NAMES
    }

    pub fn len(&self) -> usize {
        VOC_CATEGORY_NAMES.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every declared id, in order.
    pub fn ids(&self) -> impl Iterator<Item = CategoryId> {
        (0..VOC_CATEGORY_NAMES.len() as u64).map(CategoryId::new)
    }

    /// Id of an object class. Only the 20 real classes resolve;
    /// `background` is declared but cannot label an object.
    pub fn object_class_id(&self, name: &str) -> Option<CategoryId> {
        if name == BACKGROUND {
            return None;
        }
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: CategoryId) -> Option<&'static str> {
        usize::try_from(id.as_u64())
            .ok()
            .and_then(|idx| VOC_CATEGORY_NAMES.get(idx).copied())
    }

    /// The COCO `categories` list; supercategory equals name.
    pub fn to_coco_categories(&self) -> Vec<CocoCategory> {
        self.ids()
            .zip(VOC_CATEGORY_NAMES)
            .map(|(id, name)| CocoCategory {
                id,
                name: name.to_string(),
                supercategory: name.to_string(),
            })
            .collect()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::voc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_positions_in_vocabulary() {
        let map = CategoryMap::voc();
        assert_eq!(map.len(), 21);
        assert_eq!(map.object_class_id("aeroplane"), Some(CategoryId(1)));
        assert_eq!(map.object_class_id("cat"), Some(CategoryId(8)));
        assert_eq!(map.object_class_id("tvmonitor"), Some(CategoryId(20)));
        assert_eq!(map.name_of(CategoryId(15)), Some("person"));
        assert_eq!(map.name_of(CategoryId(21)), None);
    }

    #[test]
    fn background_and_unknown_names_do_not_resolve() {
        let map = CategoryMap::voc();
        assert_eq!(map.object_class_id(BACKGROUND), None);
        assert_eq!(map.object_class_id("Cat"), None);
        assert_eq!(map.object_class_id("tv"), None);
    }

    #[test]
    fn coco_categories_mirror_vocabulary() {
        let categories = CategoryMap::voc().to_coco_categories();
        assert_eq!(categories.len(), 21);
        for (idx, category) in categories.iter().enumerate() {
            assert_eq!(category.id.as_u64(), idx as u64);
            assert_eq!(category.name, VOC_CATEGORY_NAMES[idx]);
            assert_eq!(category.supercategory, category.name);
        }
    }
}
