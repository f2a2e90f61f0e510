//! Host label handling.
//!
//! # Responsibilities
//! - Split a dotted path into labels
//! - Reject empty paths and empty labels up front
//! - Reverse label order so traversal runs from the broadest scope
//!   (top-level domain) to the most specific label
//!
//! # Design Decisions
//! - Labels borrow from the input path; nothing is allocated per label
//! - Validation happens before any tree is touched

use crate::routing::tree::TreeError;

/// Separator between labels of a dotted path.
pub const LABEL_SEPARATOR: char = '.';

/// Reserved label matching any single label at its position.
pub const WILDCARD: &str = "*";

/// Reverse a label sequence in place.
///
/// `www.example.com` order becomes `com, example, www`. An empty sequence
/// is left untouched.
pub fn reverse_labels<T>(labels: &mut [T]) {
    if labels.is_empty() {
        return;
    }

    let (mut i, mut j) = (0, labels.len() - 1);
    while i < j {
        labels.swap(i, j);
        i += 1;
        j -= 1;
    }
}

/// Split a dotted path into labels, most specific label first.
pub fn split_labels(path: &str) -> Result<Vec<&str>, TreeError> {
    if path.is_empty() {
        return Err(TreeError::InvalidArgument("path must not be empty"));
    }

    let labels: Vec<&str> = path.split(LABEL_SEPARATOR).collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Err(TreeError::InvalidArgument("path must not contain an empty label"));
    }

    Ok(labels)
}

/// Split a dotted path and put its labels in traversal order.
pub fn traversal_labels(path: &str) -> Result<Vec<&str>, TreeError> {
    let mut labels = split_labels(path)?;
    reverse_labels(&mut labels);
    Ok(labels)
}
