//! Plugin-tree population — materializes trees the gradle-dep-tree and
//! maven-dep-tree plugins already resolved.
//!
//! Unlike the requested-by model there is no parent inference to do: the
//! plugin output is an adjacency list per module. Cycles can still occur
//! (version mediation keeps them legal), so expansion walks the built
//! parent chain and stops once the current node repeats an ancestor — the
//! repeated node stays attached as a leaf.

use serde::Deserialize;
use std::collections::HashMap;

use tracing::debug;

use crate::graph::{GraphNode, PackageType, UniqueDeps};

// ─── Plugin output shapes ──────────────────────────────────────────

/// One module's tree dump:
/// `{"root": id, "nodes": {id: {"children": [id, ...]}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDepTree {
    pub root: String,
    #[serde(default)]
    pub nodes: HashMap<String, DepTreeNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepTreeNode {
    #[serde(default)]
    pub children: Vec<String>,
}

// ─── Construction arena ────────────────────────────────────────────

/// Nodes under construction. `parent` is a non-owning back-index used
/// only to walk upward for the cycle check; the whole arena is discarded
/// once the owned tree has been extracted.
#[derive(Default)]
struct TreeArena {
    nodes: Vec<ArenaNode>,
}

struct ArenaNode {
    raw_id: String,
    id: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl TreeArena {
    fn alloc(&mut self, raw_id: &str, package_type: PackageType, parent: Option<usize>) -> usize {
        self.nodes.push(ArenaNode {
            raw_id: raw_id.to_owned(),
            id: package_type.apply(raw_id),
            parent,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// True when the node at `index` is itself a repeat of one of its
    /// ancestors, walked through the parent chain.
    fn node_has_loop(&self, index: usize) -> bool {
        let node = &self.nodes[index];
        let mut ancestor = node.parent;
        while let Some(i) = ancestor {
            if self.nodes[i].raw_id == node.raw_id {
                return true;
            }
            ancestor = self.nodes[i].parent;
        }
        false
    }

    /// Extract the owned tree rooted at `index`.
    fn to_tree(&self, index: usize) -> GraphNode {
        let node = &self.nodes[index];
        GraphNode {
            id: node.id.clone(),
            nodes: node.children.iter().map(|&child| self.to_tree(child)).collect(),
        }
    }
}

// ─── Population ────────────────────────────────────────────────────

/// Materialize every module tree in `modules`, in input order.
pub fn module_trees(
    modules: &[ModuleDepTree],
    package_type: PackageType,
    unique_deps: &mut UniqueDeps,
) -> Vec<GraphNode> {
    modules
        .iter()
        .map(|module| module_tree(module, package_type, unique_deps))
        .collect()
}

/// Materialize one plugin-resolved module tree.
pub fn module_tree(
    tree: &ModuleDepTree,
    package_type: PackageType,
    unique_deps: &mut UniqueDeps,
) -> GraphNode {
    let mut arena = TreeArena::default();
    let root = arena.alloc(&tree.root, package_type, None);
    unique_deps.insert(arena.nodes[root].id.clone());
    populate(&mut arena, root, tree, package_type, unique_deps);
    arena.to_tree(root)
}

fn populate(
    arena: &mut TreeArena,
    current: usize,
    tree: &ModuleDepTree,
    package_type: PackageType,
    unique_deps: &mut UniqueDeps,
) {
    if arena.node_has_loop(current) {
        debug!(
            node = %arena.nodes[current].raw_id,
            "plugin tree repeats an ancestor, leaving node as a leaf"
        );
        return;
    }
    // ids the plugin never described expand to nothing
    let children: &[String] = match tree.nodes.get(arena.nodes[current].raw_id.as_str()) {
        Some(node) => &node.children,
        None => &[],
    };
    for child_id in children {
        let child = arena.alloc(child_id, package_type, Some(current));
        unique_deps.insert(arena.nodes[child].id.clone());
        populate(arena, child, tree, package_type, unique_deps);
        arena.nodes[current].children.push(child);
    }
}
