#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use voc2coco::categories::VOC_CATEGORY_NAMES;
use voc2coco::ir::{VocBndBox, VocRecord};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A real VOC object class (never `background`).
pub fn arb_class() -> impl Strategy<Value = &'static str> {
    (1usize..VOC_CATEGORY_NAMES.len()).prop_map(|idx| VOC_CATEGORY_NAMES[idx])
}

/// A 1-based pixel box inside a `width` x `height` image.
pub fn arb_bndbox(width: u32, height: u32) -> impl Strategy<Value = VocBndBox> {
    (1..=width, 1..=height).prop_flat_map(move |(xmin, ymin)| {
        (Just(xmin), Just(ymin), xmin..=width, ymin..=height).prop_map(
            |(xmin, ymin, xmax, ymax)| {
                VocBndBox::new(xmin as f64, ymin as f64, xmax as f64, ymax as f64)
            },
        )
    })
}

fn arb_record_body(max_objects: usize) -> BoxedStrategy<(u32, u32, Vec<(&'static str, VocBndBox)>)> {
    (1u32..=1024, 1u32..=1024)
        .prop_flat_map(move |(width, height)| {
            (
                Just(width),
                Just(height),
                prop::collection::vec((arb_class(), arb_bndbox(width, height)), 0..=max_objects),
            )
        })
        .boxed()
}

/// Records named `000001.jpg`, `000002.jpg`, ... in list order.
pub fn arb_records(max_images: usize, max_objects: usize) -> BoxedStrategy<Vec<VocRecord>> {
    prop::collection::vec(arb_record_body(max_objects), 0..=max_images)
        .prop_map(|bodies| {
            bodies
                .into_iter()
                .enumerate()
                .map(|(idx, (width, height, objects))| {
                    objects.into_iter().fold(
                        VocRecord::new(format!("{:06}.jpg", idx + 1), width, height),
                        |record, (class, bndbox)| record.with_object(class, bndbox),
                    )
                })
                .collect()
        })
        .boxed()
}

pub fn object_count(records: &[VocRecord]) -> usize {
    records.iter().map(|record| record.objects.len()).sum()
}
