//! VOC records to COCO split documents.
//!
//! Each split is converted independently: annotation ids restart at 0 and
//! the `info` and `categories` header is shared from the run context.

pub mod report;

pub use report::SplitSummary;

use crate::categories::CategoryMap;
use crate::context::{RunContext, IMAGES_DIR_NAME};
use crate::error::Voc2CocoError;
use crate::ir::{AnnotationId, CocoAnnotation, CocoDataset, CocoImage, ImageId, VocRecord};

/// Convert one split's records into a COCO document.
///
/// Stops at the first record with an unusable file name or an unknown
/// class; no partial document is returned.
pub fn convert_split(
    records: &[VocRecord],
    ctx: &RunContext,
) -> Result<CocoDataset, Voc2CocoError> {
    let mut dataset = CocoDataset::new(ctx.info.clone(), ctx.categories.to_coco_categories());
    let mut next_annotation_id = AnnotationId::new(0);

    for record in records {
        let image = image_entry(record)?;
        append_annotations(
            record,
            image.id,
            &ctx.categories,
            &mut next_annotation_id,
            &mut dataset.annotations,
        )?;
        dataset.images.push(image);
    }

    Ok(dataset)
}

/// The COCO image entry for a record. Width and height come from the XML;
/// the image file itself is not opened.
pub fn image_entry(record: &VocRecord) -> Result<CocoImage, Voc2CocoError> {
    Ok(CocoImage {
        id: parse_image_id(&record.filename)?,
        file_name: record.filename.clone(),
        coco_url: format!("{IMAGES_DIR_NAME}/{}", record.filename),
        width: record.width,
        height: record.height,
    })
}

fn append_annotations(
    record: &VocRecord,
    image_id: ImageId,
    categories: &CategoryMap,
    next_id: &mut AnnotationId,
    out: &mut Vec<CocoAnnotation>,
) -> Result<(), Voc2CocoError> {
    for object in &record.objects {
        let category_id = categories.object_class_id(&object.name).ok_or_else(|| {
            Voc2CocoError::UnknownCategory {
                name: object.name.clone(),
                file_name: record.filename.clone(),
            }
        })?;

        out.push(CocoAnnotation::new(
            *next_id,
            image_id,
            category_id,
            object.bndbox.to_coco(),
        ));
        *next_id = next_id.next();
    }
    Ok(())
}

/// Derive an image id from a VOC file name.
///
/// The id is the text before the first `.`, read as a decimal integer.
/// Single underscores between digits are digit separators, so the VOC2012
/// name `2008_000008.jpg` maps to `2008000008`.
pub fn parse_image_id(file_name: &str) -> Result<ImageId, Voc2CocoError> {
    let invalid = || Voc2CocoError::InvalidImageId {
        file_name: file_name.to_string(),
    };

    let stem = file_name.split('.').next().unwrap_or_default();
    let digits = strip_digit_separators(stem).ok_or_else(invalid)?;
    digits.parse::<u64>().map(ImageId::new).map_err(|_| invalid())
}

/// Removes `_` separators, accepting only `digit(_?digit)*`.
fn strip_digit_separators(raw: &str) -> Option<String> {
    let mut digits = String::with_capacity(raw.len());
    let mut previous_was_digit = false;

    for ch in raw.chars() {
        match ch {
            '0'..='9' => {
                digits.push(ch);
                previous_was_digit = true;
            }
            '_' if previous_was_digit => previous_was_digit = false,
            _ => return None,
        }
    }

    // Empty input or a trailing separator.
    if !previous_was_digit {
        return None;
    }
    Some(digits)
}
