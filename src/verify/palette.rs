//! Per-category drawing colours for preview images.

use std::collections::BTreeMap;

use image::Rgb;
use rand::RngExt;

use crate::categories::CategoryMap;
use crate::ir::CategoryId;

/// One drawing colour per category id, fixed for the lifetime of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: BTreeMap<CategoryId, Rgb<u8>>,
}

impl Palette {
    /// A fresh random colour for every declared category.
    pub fn random(categories: &CategoryMap) -> Self {
        let mut rng = rand::rng();
        let colors = categories
            .ids()
            .map(|id| (id, Rgb([rng.random(), rng.random(), rng.random()])))
            .collect();
        Self { colors }
    }

    /// The same colour for every category.
    pub fn uniform(categories: &CategoryMap, rgb: [u8; 3]) -> Self {
        let colors = categories.ids().map(|id| (id, Rgb(rgb))).collect();
        Self { colors }
    }

    pub fn color(&self, id: CategoryId) -> Option<Rgb<u8>> {
        self.colors.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_palette_covers_every_category() {
        let categories = CategoryMap::voc();
        let palette = Palette::random(&categories);
        assert_eq!(palette.len(), 21);
        for id in categories.ids() {
            assert!(palette.color(id).is_some());
        }
        assert!(palette.color(CategoryId(21)).is_none());
    }

    #[test]
    fn palette_is_stable_within_a_run() {
        let palette = Palette::random(&CategoryMap::voc());
        assert_eq!(palette.color(CategoryId(3)), palette.color(CategoryId(3)));
    }

    #[test]
    fn uniform_palette_uses_given_colour() {
        let palette = Palette::uniform(&CategoryMap::voc(), [1, 2, 3]);
        assert_eq!(palette.color(CategoryId(20)), Some(Rgb([1, 2, 3])));
    }
}
