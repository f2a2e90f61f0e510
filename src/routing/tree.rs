//! Host label tree.
//!
//! # Responsibilities
//! - Store an opaque context per inserted dotted path
//! - Resolve a dotted path to its best matching context
//! - Support single-label wildcards (`*`) at any position
//!
//! # Design Decisions
//! - One node per label; each node owns its children by label
//! - Root is the broadest scope, depth grows with specificity
//! - Exact labels beat wildcards at the same level
//! - Nodes are never removed; insertion never overwrites
//! - Errors are plain values, the caller decides whether to log them
//!
//! # Wildcard aliasing
//! When a level already holds a `*` child and the label being inserted has
//! no exact sibling, insertion descends into the wildcard's subtree instead
//! of branching. A later, more specific path can therefore end up stored
//! under an earlier wildcard.

use std::collections::HashMap;

use thiserror::Error;

use crate::routing::labels::{traversal_labels, WILDCARD};

/// Errors returned by [`LabelTree`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Empty path, empty label sequence, or an empty label.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The terminal label of an insertion resolves to an existing node.
    #[error("item already exists")]
    AlreadyExists,

    /// No exact, wildcard or catch-all match.
    #[error("item not found")]
    NotFound,

    /// Lookup on a tree whose storage was never initialized.
    #[error("invalid data: tree is not initialized, use LabelTree::new()")]
    InvalidData,
}

/// A node-per-label tree mapping dotted paths to contexts.
///
/// `LabelTree::default()` leaves the child map uninitialized: [`add`]
/// initializes it on first use while [`get`] reports
/// [`TreeError::InvalidData`]. Use [`LabelTree::new`] for a ready tree.
///
/// [`add`]: LabelTree::add
/// [`get`]: LabelTree::get
#[derive(Debug, Clone)]
pub struct LabelTree<C> {
    context: Option<C>,
    nodes: Option<HashMap<String, LabelTree<C>>>,
}

impl<C> Default for LabelTree<C> {
    fn default() -> Self {
        Self {
            context: None,
            nodes: None,
        }
    }
}

impl<C> LabelTree<C> {
    /// Create an empty, initialized tree.
    pub fn new() -> Self {
        Self {
            context: None,
            nodes: Some(HashMap::new()),
        }
    }

    /// Whether the child storage has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.nodes.is_some()
    }

    /// Context stored at this node, if a path terminates here.
    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    /// Register `path` (e.g. `www.example.com`, `*.example.com`) with `context`.
    pub fn add(&mut self, path: &str, context: C) -> Result<(), TreeError> {
        let labels = traversal_labels(path)?;
        self.add_labels(&labels, context)
    }

    /// Register an already reversed label sequence (`["com", "example", "www"]`).
    pub fn add_labels(&mut self, labels: &[&str], context: C) -> Result<(), TreeError> {
        if labels.is_empty() {
            return Err(TreeError::InvalidArgument("label sequence must not be empty"));
        }
        if labels.iter().any(|label| label.is_empty()) {
            return Err(TreeError::InvalidArgument("path must not contain an empty label"));
        }

        let mut node = self;
        let mut rest = labels;
        while let Some((label, tail)) = rest.split_first() {
            let children = node.nodes.get_or_insert_with(HashMap::new);

            let key = if children.contains_key(*label) {
                *label
            } else if children.contains_key(WILDCARD) {
                WILDCARD
            } else {
                // A new node has no children, so the rest of the path is new too.
                children.insert((*label).to_owned(), LabelTree::branch(tail, context));
                return Ok(());
            };

            if tail.is_empty() {
                return Err(TreeError::AlreadyExists);
            }

            node = match children.get_mut(key) {
                Some(child) => child,
                // `key` was just found in `children`.
                None => return Err(TreeError::NotFound),
            };

            rest = tail;
        }

        Ok(())
    }

    /// A fresh chain of nodes for `labels`, ending in `context`.
    fn branch(labels: &[&str], context: C) -> Self {
        labels.iter().rev().fold(
            Self {
                context: Some(context),
                nodes: Some(HashMap::new()),
            },
            |child, label| Self {
                context: None,
                nodes: Some(HashMap::from([((*label).to_owned(), child)])),
            },
        )
    }

    /// Resolve `path` to the best matching context.
    ///
    /// `Ok(None)` means the path matched a node that carries no context.
    pub fn get(&self, path: &str) -> Result<Option<&C>, TreeError> {
        if path.is_empty() {
            return Err(TreeError::InvalidArgument("path must not be empty"));
        }
        if !self.is_initialized() {
            return Err(TreeError::InvalidData);
        }

        let labels = traversal_labels(path)?;
        self.get_labels(&labels)
    }

    /// Resolve an already reversed label sequence.
    pub fn get_labels(&self, labels: &[&str]) -> Result<Option<&C>, TreeError> {
        if !self.is_initialized() {
            return Err(TreeError::InvalidData);
        }
        if labels.is_empty() {
            return Err(TreeError::InvalidArgument("label sequence must not be empty"));
        }
        if labels.iter().any(|label| label.is_empty()) {
            return Err(TreeError::InvalidArgument("path must not contain an empty label"));
        }

        let last = labels.len() - 1;
        let mut node = self;
        let mut via_wildcard = false;
        for (i, label) in labels.iter().enumerate() {
            let found = if let Some(child) = node.child(label) {
                via_wildcard = false;
                Some(child)
            } else if let Some(child) = node.child(WILDCARD) {
                via_wildcard = true;
                Some(child)
            } else {
                None
            };

            let Some(child) = found else {
                // Catch-all: the rest of the path falls under the wildcard we came through.
                if via_wildcard {
                    if let Some(context) = node.context.as_ref() {
                        return Ok(Some(context));
                    }
                }
                return Err(TreeError::NotFound);
            };

            if i == last {
                return Ok(child.context.as_ref());
            }

            node = child;
        }

        Err(TreeError::NotFound)
    }

    fn child(&self, label: &str) -> Option<&LabelTree<C>> {
        self.nodes.as_ref()?.get(label)
    }
}
