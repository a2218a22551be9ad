//! Class label table
//!
//! Maps model output positions to human-readable labels. The table is
//! immutable once built and is injected wherever labels are needed, so a
//! pipeline for a retrained model only needs a different table, not a
//! different build.

use core::fmt;

use heapless::{String, Vec};

use crate::constants::classes::{CLASS_NAMES, MAX_CLASSES, MAX_LABEL_LEN, UNKNOWN_CLASS};
use crate::errors::ClassTableError;

/// One stored label
pub type Label = String<MAX_LABEL_LEN>;

/// Ordered, fixed-capacity table of class labels
#[derive(Clone, PartialEq, Eq)]
pub struct ClassTable {
    labels: Vec<Label, MAX_CLASSES>,
}

impl ClassTable {
    /// Build a table from labels in model output order
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, ClassTableError> {
        if labels.is_empty() {
            return Err(ClassTableError::Empty);
        }
        if labels.len() > MAX_CLASSES {
            return Err(ClassTableError::TooManyClasses {
                count: labels.len(),
                capacity: MAX_CLASSES,
            });
        }

        let mut stored = Vec::new();
        for (index, label) in labels.iter().enumerate() {
            let mut entry = Label::new();
            entry
                .push_str(label.as_ref())
                .map_err(|_| ClassTableError::LabelTooLong { index, max_len: MAX_LABEL_LEN })?;
            // Length checked above
            let _ = stored.push(entry);
        }

        Ok(Self { labels: stored })
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at `index`, or `"Unknown"` if out of bounds
    pub fn name(&self, index: usize) -> &str {
        self.get(index).unwrap_or(UNKNOWN_CLASS)
    }

    /// Label at `index` if in bounds
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|label| label.as_str())
    }

    /// Position of a label
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label.as_str() == name)
    }

    /// Labels in model output order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(|label| label.as_str())
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        let mut labels = Vec::new();
        for name in CLASS_NAMES {
            let mut entry = Label::new();
            // Reference labels fit MAX_LABEL_LEN; covered by tests
            let _ = entry.push_str(name);
            let _ = labels.push(entry);
        }
        Self { labels }
    }
}

impl fmt::Debug for ClassTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::classes::NUM_CLASSES;

    #[test]
    fn default_table_matches_reference() {
        let table = ClassTable::default();
        assert_eq!(table.len(), NUM_CLASSES);
        for (i, name) in CLASS_NAMES.iter().enumerate() {
            assert_eq!(table.name(i), *name);
        }
        assert_eq!(table.name(3), "Downy Mildew");
    }

    #[test]
    fn out_of_range_is_unknown() {
        let table = ClassTable::default();
        assert_eq!(table.name(8), "Unknown");
        assert_eq!(table.name(usize::MAX), "Unknown");
        assert_eq!(table.get(8), None);
    }

    #[test]
    fn lookup_by_name() {
        let table = ClassTable::default();
        assert_eq!(table.index_of("Fresh Leaf"), Some(5));
        assert_eq!(table.index_of("Powdery Mildew"), None);
    }

    #[test]
    fn custom_table() {
        let table = ClassTable::from_labels(&["healthy", "blight"]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.names().last(), Some("blight"));
    }

    #[test]
    fn rejects_bad_tables() {
        let empty: [&str; 0] = [];
        assert_eq!(ClassTable::from_labels(&empty), Err(ClassTableError::Empty));

        let too_many = ["x"; MAX_CLASSES + 1];
        assert!(matches!(
            ClassTable::from_labels(&too_many),
            Err(ClassTableError::TooManyClasses { .. })
        ));

        let long = "x".repeat(MAX_LABEL_LEN + 1);
        assert_eq!(
            ClassTable::from_labels(&["ok", long.as_str()]),
            Err(ClassTableError::LabelTooLong { index: 1, max_len: MAX_LABEL_LEN })
        );
    }
}
