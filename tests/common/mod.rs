#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// One annotated image to place in a synthetic devkit.
pub struct SeedImage {
    pub stem: &'static str,
    pub width: u32,
    pub height: u32,
    pub objects: Vec<(&'static str, [u32; 4])>,
}

impl SeedImage {
    pub fn new(stem: &'static str, width: u32, height: u32) -> Self {
        Self {
            stem,
            width,
            height,
            objects: Vec::new(),
        }
    }

    pub fn object(mut self, class: &'static str, bndbox: [u32; 4]) -> Self {
        self.objects.push((class, bndbox));
        self
    }
}

pub fn annotation_xml(image: &SeedImage) -> String {
    let mut xml = format!(
        "<annotation>\n  <folder>VOC2007</folder>\n  <filename>{}.jpg</filename>\n  \
         <size>\n    <width>{}</width>\n    <height>{}</height>\n    <depth>3</depth>\n  </size>\n",
        image.stem, image.width, image.height
    );
    for (class, [xmin, ymin, xmax, ymax]) in &image.objects {
        xml.push_str(&format!(
            "  <object>\n    <name>{class}</name>\n    <pose>Unspecified</pose>\n    \
             <truncated>0</truncated>\n    <difficult>0</difficult>\n    <bndbox>\n      \
             <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      \
             <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n"
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

/// Lay out an unpacked VOC2007 devkit under `root` and return its base dir.
///
/// `train` and `val` partition `images` (first half / second half),
/// `trainval` lists all of them and `test` lists `test_images`.
pub fn seed_voc2007(root: &Path, images: &[SeedImage], test_images: &[SeedImage]) -> PathBuf {
    let base = root.join("VOCdevkit/VOC2007");
    let annotations = base.join("Annotations");
    let jpegs = base.join("JPEGImages");
    let lists = base.join("ImageSets/Main");
    for dir in [&annotations, &jpegs, &lists] {
        fs::create_dir_all(dir).expect("create devkit dir");
    }

    for image in images.iter().chain(test_images) {
        fs::write(
            annotations.join(format!("{}.xml", image.stem)),
            annotation_xml(image),
        )
        .expect("write annotation");
        RgbImage::from_pixel(image.width, image.height, Rgb([90, 90, 90]))
            .save(jpegs.join(format!("{}.jpg", image.stem)))
            .expect("write jpeg");
    }

    let stems = |set: &[SeedImage]| -> String {
        set.iter().map(|img| format!("{}\n", img.stem)).collect()
    };
    let half = images.len() / 2;
    fs::write(lists.join("train.txt"), stems(&images[..half])).expect("write train");
    fs::write(lists.join("val.txt"), stems(&images[half..])).expect("write val");
    fs::write(lists.join("trainval.txt"), stems(images)).expect("write trainval");
    fs::write(lists.join("test.txt"), stems(test_images)).expect("write test");
    base
}

/// A small devkit: four trainval images and one test image.
pub fn seed_small_voc2007(root: &Path) -> PathBuf {
    let images = [
        SeedImage::new("000001", 500, 375).object("cat", [10, 20, 110, 220]),
        SeedImage::new("000002", 320, 240)
            .object("dog", [1, 1, 50, 60])
            .object("person", [100, 40, 200, 230]),
        SeedImage::new("000003", 200, 150),
        SeedImage::new("000004", 256, 256).object("tvmonitor", [30, 30, 90, 80]),
    ];
    let test = [SeedImage::new("000005", 300, 200).object("aeroplane", [5, 5, 295, 195])];
    seed_voc2007(root, &images, &test)
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("parse json")
}
