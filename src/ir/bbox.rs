//! Bounding box types for both sides of the conversion.

use serde::{Deserialize, Serialize};

/// A VOC `<bndbox>`: 1-based pixel corners, both ends inclusive.
///
/// The constructor does not enforce `min <= max`; a malformed box is carried
/// through as-is and produces a negative width or height downstream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VocBndBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl VocBndBox {
    /// Creates a box from explicit corner values.
    #[inline]
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Converts to COCO `[x, y, width, height]`.
    ///
    /// The origin moves to 0-based (`x = xmin - 1`), and the extent is
    /// measured from that shifted origin to the inclusive max corner, so
    /// `width = xmax - xmin + 1`. This is the formula the published VOC to
    /// COCO files were produced with and is kept verbatim.
    #[inline]
    pub fn to_coco(&self) -> CocoBBox {
        let x = self.xmin - 1.0;
        let y = self.ymin - 1.0;
        CocoBBox::new(x, y, self.xmax - x, self.ymax - y)
    }
}

/// A COCO bounding box: top-left corner plus width and height, in absolute
/// pixels. Serialized as the 4-element array `[x, y, width, height]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CocoBBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CocoBBox {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `width * height`. May be negative if the box is malformed.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if all components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Integer pixel rectangle `(x0, y0, x1, y1)` used for drawing.
    ///
    /// Each component is truncated toward zero before the far corner is
    /// computed, so `x1 = trunc(x) + trunc(width)`.
    pub fn truncated_corners(&self) -> (i32, i32, i32, i32) {
        let x = self.x as i32;
        let y = self.y as i32;
        let w = self.width as i32;
        let h = self.height as i32;
        (x, y, x.saturating_add(w), y.saturating_add(h))
    }
}

impl From<[f64; 4]> for CocoBBox {
    fn from(values: [f64; 4]) -> Self {
        let [x, y, width, height] = values;
        Self::new(x, y, width, height)
    }
}

// COCO stores boxes as bare arrays rather than objects.
impl Serialize for CocoBBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CocoBBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = <[f64; 4]>::deserialize(deserializer)?;
        Ok(CocoBBox::from(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voc_to_coco_shifts_origin_and_keeps_inclusive_extent() {
        let coco = VocBndBox::new(10.0, 20.0, 110.0, 220.0).to_coco();
        assert_eq!(coco, CocoBBox::new(9.0, 19.0, 101.0, 201.0));
        assert_eq!(coco.area(), 20301.0);
    }

    #[test]
    fn test_single_pixel_box_has_unit_extent() {
        let coco = VocBndBox::new(1.0, 1.0, 1.0, 1.0).to_coco();
        assert_eq!(coco.to_array(), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(coco.area(), 1.0);
    }

    #[test]
    fn test_malformed_box_is_carried_through() {
        let coco = VocBndBox::new(50.0, 50.0, 10.0, 60.0).to_coco();
        assert!(coco.width < 0.0);
        assert!(coco.is_finite());
    }

    #[test]
    fn test_truncated_corners_follow_int_semantics() {
        let bbox = CocoBBox::new(9.7, 19.2, 101.9, 201.5);
        assert_eq!(bbox.truncated_corners(), (9, 19, 110, 220));
    }

    #[test]
    fn test_bbox_serializes_as_array() {
        let json = serde_json::to_string(&CocoBBox::new(9.0, 19.0, 101.0, 201.0))
            .expect("serialize bbox");
        assert_eq!(json, "[9.0,19.0,101.0,201.0]");

        let parsed: CocoBBox = serde_json::from_str("[1, 2, 3, 4]").expect("parse bbox");
        assert_eq!(parsed, CocoBBox::new(1.0, 2.0, 3.0, 4.0));
    }
}
