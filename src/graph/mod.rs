//! Dependency graph model — canonical nodes, identifier schemes, and the
//! global unique-dependency collector.

pub mod plugin_tree;
pub mod requested_by;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ─── Identifier scheme ─────────────────────────────────────────────

/// Coordinate scheme tag prepended to every raw id, so graph-wide
/// identifiers are self-describing about their origin ecosystem.
/// Downstream consumers rely on the prefix to recognize the scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Java Group-Artifact-Version coordinates (Maven and Gradle).
    Gav,
    Npm,
    Pypi,
    Go,
    Nuget,
}

impl PackageType {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Gav => "gav://",
            Self::Npm => "npm://",
            Self::Pypi => "pypi://",
            Self::Go => "go://",
            Self::Nuget => "nuget://",
        }
    }

    /// Canonical identifier for a raw coordinate: `prefix + raw`.
    pub fn apply(self, raw_id: &str) -> String {
        format!("{}{}", self.prefix(), raw_id)
    }
}

// ─── Graph node ────────────────────────────────────────────────────

/// A single node in a module's dependency tree.
///
/// Children are exclusively owned: a coordinate requested by two parents
/// becomes two nodes, one under each requester subtree. Only the
/// [`UniqueDeps`] collector is globally deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<GraphNode>,
}

impl GraphNode {
    pub fn new(id: String) -> Self {
        Self {
            id,
            nodes: Vec::new(),
        }
    }

    /// Every id in this subtree, root included, preorder.
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.id.as_str());
            stack.extend(node.nodes.iter().rev());
        }
        ids
    }
}

// ─── Unique-dependency collector ───────────────────────────────────

/// Set of every canonical identifier seen across all module trees of one
/// construction call. Grows monotonically during construction and is
/// handed to the caller as a sorted list, so the result is independent of
/// module processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueDeps(BTreeSet<String>);

impl UniqueDeps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.0.insert(id.into());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold another module's collector into this one.
    pub fn merge(&mut self, other: UniqueDeps) {
        self.0.extend(other.0);
    }

    /// Sorted identifier list for the API boundary.
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}
