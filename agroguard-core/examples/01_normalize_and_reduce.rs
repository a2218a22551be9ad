//! Basic Normalization and Reduction Example
//!
//! Runs the numeric half of the pipeline by hand:
//! validate readings, standardize them, then reduce a confidence vector
//! the way the pipeline does after inference.

use agroguard_core::{
    ClassTable, MetadataNormalizer, MetadataValidator, RawMetadata, reduce,
};

fn main() {
    println!("=== AgroGuard Normalization Example ===\n");

    let normalizer = MetadataNormalizer::default();
    let validator = MetadataValidator::default();

    let readings = [
        RawMetadata::new(26.0, 88.0, 35.0),
        RawMetadata::new(23.196, 85.624, 28.163),
        RawMetadata::new(26.0, 880.0, 35.0),
        RawMetadata::new(f32::NAN, 70.0, 10.0),
    ];

    for raw in &readings {
        match validator.validate(raw) {
            Ok(()) => println!("{} -> {}", raw, normalizer.normalize_raw(raw)),
            Err(e) => println!("{} -> rejected: {}", raw, e),
        }
    }

    println!("\nReduction");
    println!("=========");

    let classes = ClassTable::default();
    let outputs: [&[f32]; 3] = [
        &[0.1, 0.05, 0.05, 0.6, 0.05, 0.05, 0.05, 0.05],
        &[0.3, 0.5, 0.5, 0.1, 0.0, 0.0, 0.0, 0.0],
        &[0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.9],
    ];

    for scores in outputs {
        match reduce(scores, &classes) {
            Ok(result) => println!("\n{}", result.summary()),
            Err(e) => println!("\nreduction failed: {}", e),
        }
    }
}
