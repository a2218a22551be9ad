//! Class Label Table
//!
//! Index `i` of this table names output `i` of the model. The ordering is
//! the contract with the trained weights (alphabetical, as produced by the
//! dataset loader at training time).

/// Number of classes the reference model predicts.
pub const NUM_CLASSES: usize = 8;

/// Upper bound on classes for any model profile.
///
/// Sizes the fixed-capacity storage in [`crate::ClassTable`] and
/// [`crate::ClassificationResult`].
pub const MAX_CLASSES: usize = 32;

/// Upper bound on label length in bytes.
pub const MAX_LABEL_LEN: usize = 48;

/// Sentinel returned when an index falls outside the table.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Reference class labels in model output order.
pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "Anthracnose",
    "Bacterial Wilt",
    "Belly Rot",
    "Downy Mildew",
    "Fresh Cucumber",
    "Fresh Leaf",
    "Gummy Stem Blight",
    "Pythium Fruit Rot",
];
