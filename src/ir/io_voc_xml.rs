//! Pascal VOC annotation XML and image-set list readers.
//!
//! A VOC devkit keeps one XML file per image under `Annotations/` and one
//! plain-text list of image stems per split under `ImageSets/Main/`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;

use super::bbox::VocBndBox;
use super::model::{VocObject, VocRecord};
use crate::error::Voc2CocoError;

const OBJECT_ATTRIBUTE_TAGS: [&str; 4] = ["pose", "truncated", "difficult", "occluded"];

/// Parse one VOC annotation XML file.
pub fn read_voc_xml(path: &Path) -> Result<VocRecord, Voc2CocoError> {
    let xml = fs::read_to_string(path).map_err(Voc2CocoError::Io)?;
    parse_voc_xml_str(&xml, path)
}

/// Parse VOC XML from a UTF-8 string.
///
/// This helper is primarily useful for testing/fuzzing parse behavior in-memory.
pub fn from_voc_xml_str(xml: &str) -> Result<VocRecord, Voc2CocoError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<VocRecord, Voc2CocoError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| Voc2CocoError::VocXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

/// Read an `ImageSets/Main/<split>.txt` list.
///
/// Returns the image stems in file order; blank lines are skipped and
/// surrounding whitespace is trimmed.
pub fn read_image_set(path: &Path) -> Result<Vec<String>, Voc2CocoError> {
    let raw = fs::read_to_string(path).map_err(Voc2CocoError::Io)?;
    Ok(parse_image_set(&raw))
}

fn parse_image_set(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Fuzz-only entrypoint for image-set list parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_image_set(input: &str) -> usize {
    parse_image_set(input).len()
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<VocRecord, Voc2CocoError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| Voc2CocoError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let annotation = document.root_element();
    if annotation.tag_name().name() != "annotation" {
        return Err(Voc2CocoError::VocXmlParse {
            path: path.to_path_buf(),
            message: "missing <annotation> root element".to_string(),
        });
    }

    let filename = required_child_text(annotation, "filename", path, "<annotation>")?;

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = parse_required_u32(size, "width", path, "<size>")?;
    let height = parse_required_u32(size, "height", path, "<size>")?;
    let depth = optional_child_text(size, "depth")
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| Voc2CocoError::VocXmlParse {
                path: path.to_path_buf(),
                message: format!("invalid <depth> value '{raw}' in <size>; expected u32"),
            })
        })
        .transpose()?;

    let mut objects = Vec::new();
    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", path, "<object>")?;
        let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

        let xmin = parse_required_f64(bndbox, "xmin", path, "<bndbox>")?;
        let ymin = parse_required_f64(bndbox, "ymin", path, "<bndbox>")?;
        let xmax = parse_required_f64(bndbox, "xmax", path, "<bndbox>")?;
        let ymax = parse_required_f64(bndbox, "ymax", path, "<bndbox>")?;

        let mut attributes = BTreeMap::new();
        for key in OBJECT_ATTRIBUTE_TAGS {
            if let Some(value) = optional_child_text(object, key) {
                attributes.insert(key.to_string(), value);
            }
        }

        objects.push(VocObject {
            name,
            bndbox: VocBndBox::new(xmin, ymin, xmax, ymax),
            attributes,
        });
    }

    Ok(VocRecord {
        filename,
        width,
        height,
        depth,
        objects,
    })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, Voc2CocoError> {
    child_element(node, tag).ok_or_else(|| Voc2CocoError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, Voc2CocoError> {
    optional_child_text(node, tag).ok_or_else(|| Voc2CocoError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required_u32(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<u32, Voc2CocoError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<u32>().map_err(|_| Voc2CocoError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected u32"),
    })
}

fn parse_required_f64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<f64, Voc2CocoError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<f64>().map_err(|_| Voc2CocoError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!(
            "invalid <{tag}> value '{raw}' in {context}; expected floating-point number"
        ),
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}
