//! Requested-by tree population — infers each module's tree from a flat
//! dependency list annotated with requester chains.
//!
//! The build-info extractor reports every dependency of a module flat,
//! each carrying the ancestor chains that pulled it in. Directly requested
//! dependencies hang off the module root; everything else becomes
//! reachable through a parent→children index built from those chains.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::build_info::{Dependency, Module};
use crate::graph::{GraphNode, PackageType, UniqueDeps};

// ─── Parent→child index ────────────────────────────────────────────

/// Maps a canonical parent id to its declared direct children, keyed by
/// child id so a duplicate declaration overwrites instead of piling up.
/// Built once per module, discarded after population.
struct DependencyMultimap<'a> {
    map: HashMap<String, BTreeMap<&'a str, &'a Dependency>>,
}

impl<'a> DependencyMultimap<'a> {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    fn put_child(&mut self, parent: String, child: &'a Dependency) {
        self.map
            .entry(parent)
            .or_default()
            .insert(child.id.as_str(), child);
    }

    /// Children of `parent` in id order; empty for unknown parents.
    fn children(&self, parent: &str) -> impl Iterator<Item = &'a Dependency> + '_ {
        self.map
            .get(parent)
            .into_iter()
            .flat_map(|children| children.values().copied())
    }
}

// ─── Population ────────────────────────────────────────────────────

/// Build one module's dependency tree from its flat requested-by list.
///
/// Every node created, the module root included, records its canonical id
/// in `unique_deps`.
pub fn module_tree(
    module: &Module,
    package_type: PackageType,
    unique_deps: &mut UniqueDeps,
) -> GraphNode {
    let mut root = GraphNode::new(package_type.apply(&module.id));
    unique_deps.insert(root.id.clone());

    let mut direct: BTreeMap<&str, &Dependency> = BTreeMap::new();
    let mut index = DependencyMultimap::new();
    for dependency in &module.dependencies {
        if is_direct(&module.id, &dependency.requested_by) {
            direct.insert(dependency.id.as_str(), dependency);
            continue;
        }
        for chain in &dependency.requested_by {
            if let Some(requester) = chain.first() {
                index.put_child(package_type.apply(requester), dependency);
            }
        }
    }

    let mut path = Vec::new();
    for dependency in direct.values() {
        populate_transitive(
            &mut root,
            &dependency.id,
            &index,
            &mut path,
            package_type,
            unique_deps,
        );
    }
    root
}

/// A dependency is direct when it names no requesters at all, or when any
/// of its chains starts at the module itself.
fn is_direct(module_id: &str, requested_by: &[Vec<String>]) -> bool {
    if requested_by.is_empty() || requested_by[0].is_empty() {
        return true;
    }
    requested_by
        .iter()
        .any(|chain| chain.first().is_some_and(|requester| requester == module_id))
}

/// Attach `dependency_id` under `parent` and expand its own children
/// through the index.
///
/// `path` holds the raw ids from the module root down to `parent`. A
/// candidate already on the path is a cycle reported by the build tool;
/// that branch is dropped without creating a node.
fn populate_transitive(
    parent: &mut GraphNode,
    dependency_id: &str,
    index: &DependencyMultimap<'_>,
    path: &mut Vec<String>,
    package_type: PackageType,
    unique_deps: &mut UniqueDeps,
) {
    if path.iter().any(|seen| seen == dependency_id) {
        debug!(
            dependency = dependency_id,
            "build tool reported a dependency cycle, dropping branch"
        );
        return;
    }
    path.push(dependency_id.to_owned());

    let mut node = GraphNode::new(package_type.apply(dependency_id));
    unique_deps.insert(node.id.clone());
    for child in index.children(&node.id) {
        populate_transitive(&mut node, &child.id, index, path, package_type, unique_deps);
    }

    path.pop();
    parent.nodes.push(node);
}
