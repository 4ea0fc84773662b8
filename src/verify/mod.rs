//! Re-reading written splits and rendering ground-truth previews.
//!
//! Verification loads `instances_<split>.json` back through [`CocoIndex`],
//! checks that the category header matches the vocabulary, and draws every
//! annotation onto a copy of its image under `imagesGt_<split>/`.

mod draw;
mod palette;

pub use draw::{draw_box, draw_label, GLYPH_SIZE, OUTLINE_WIDTH};
pub use palette::Palette;

use std::fs;
use std::path::Path;

use image::RgbImage;
use log::{debug, info};

use crate::categories::CategoryMap;
use crate::context::RunContext;
use crate::dataset::VocSplit;
use crate::error::Voc2CocoError;
use crate::ir::coco_index::CocoIndex;
use crate::ir::{CocoAnnotation, CocoImage};

/// What a verification pass checked and rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifySummary {
    pub split: VocSplit,
    pub previews: usize,
    pub boxes: usize,
}

/// Verify one written split and render its previews.
pub fn verify_split(ctx: &RunContext, split: VocSplit) -> Result<VerifySummary, Voc2CocoError> {
    let path = ctx.config.instances_path(split);
    info!("[{split}] verifying {}", path.display());
    let index = CocoIndex::open(&path)?;

    check_categories(&index, &ctx.categories, split)?;
    info!("[{split}] category header matches vocabulary");

    let preview_dir = ctx.config.preview_dir(split);
    fs::create_dir(&preview_dir).map_err(Voc2CocoError::Io)?;

    let mut summary = VerifySummary {
        split,
        previews: 0,
        boxes: 0,
    };
    for image in index.images() {
        let annotations = index.annotations_for_image(image.id);
        render_preview(ctx, &index, split, image, &annotations, &preview_dir)?;
        summary.previews += 1;
        summary.boxes += annotations.len();
    }

    info!(
        "[{split}] wrote {} previews with {} boxes to {}",
        summary.previews,
        summary.boxes,
        preview_dir.display()
    );
    Ok(summary)
}

/// The ordered category names and then the ordered supercategory names
/// must both equal the vocabulary.
pub fn check_categories(
    index: &CocoIndex,
    categories: &CategoryMap,
    split: VocSplit,
) -> Result<(), Voc2CocoError> {
    let expected = categories.names();

    if index.category_names() != expected {
        return Err(check_failed(split, "category names differ from the VOC vocabulary"));
    }
    if index.supercategory_names() != expected {
        return Err(check_failed(
            split,
            "supercategory names differ from the VOC vocabulary",
        ));
    }
    Ok(())
}

fn render_preview(
    ctx: &RunContext,
    index: &CocoIndex,
    split: VocSplit,
    image: &CocoImage,
    annotations: &[&CocoAnnotation],
    preview_dir: &Path,
) -> Result<(), Voc2CocoError> {
    let source = ctx.output_dir().join(&image.coco_url);
    debug!("[{split}] drawing {} boxes on {}", annotations.len(), source.display());

    let mut canvas: RgbImage = image::open(&source)
        .map_err(|source_err| Voc2CocoError::Image {
            path: source.clone(),
            source: source_err,
        })?
        .to_rgb8();

    for ann in annotations {
        let category = index.category(ann.category_id).ok_or_else(|| {
            check_failed(
                split,
                &format!(
                    "annotation {} references undeclared category {}",
                    ann.id, ann.category_id
                ),
            )
        })?;
        let color = ctx.palette.color(ann.category_id).ok_or_else(|| {
            check_failed(
                split,
                &format!("no preview colour for category {}", ann.category_id),
            )
        })?;

        draw_box(&mut canvas, &ann.bbox, color);
        let (x, y, _, _) = ann.bbox.truncated_corners();
        draw_label(&mut canvas, x, y, &category.name, color);
    }

    let target = preview_dir.join(&image.file_name);
    canvas.save(&target).map_err(|source| Voc2CocoError::Image {
        path: target.clone(),
        source,
    })
}

fn check_failed(split: VocSplit, check: &str) -> Voc2CocoError {
    Voc2CocoError::CheckFailed {
        split: split.to_string(),
        check: check.to_string(),
    }
}
