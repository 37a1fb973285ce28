//! Engine orchestration — build-tool output in, dependency graph out
//!
//! The engine never runs Maven or Gradle itself. A [`BuildToolDriver`]
//! (external collaborator) produces either generated build-info records or
//! a plugin output path list; the engine routes that into the matching
//! populator and returns one root node per module plus the global unique
//! identifier list.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::build_info::{BuildConfiguration, BuildInfo, Technology};
use crate::graph::{plugin_tree, requested_by, GraphNode, UniqueDeps};
use crate::ingest;
use crate::{GavelError, GavelResult};

// ─── Parameters ────────────────────────────────────────────────────

/// Everything a driver needs to run the underlying tool. Server
/// credentials are acquired elsewhere and never flow through the engine.
#[derive(Debug, Clone)]
pub struct DepTreeParams {
    pub technology: Technology,
    pub insecure_tls: bool,
    pub ignore_config_file: bool,
    pub exclude_test_deps: bool,
    pub use_wrapper: bool,
    /// Remote repository to resolve dependencies through, when set.
    pub deps_repo: Option<String>,
}

impl DepTreeParams {
    pub fn new(technology: Technology) -> Self {
        Self {
            technology,
            insecure_tls: false,
            ignore_config_file: false,
            exclude_test_deps: false,
            use_wrapper: false,
            deps_repo: None,
        }
    }
}

// ─── Driver seam ───────────────────────────────────────────────────

/// What one external build-tool run handed back.
#[derive(Debug, Clone)]
pub enum ToolOutput {
    /// Generated build-info records carrying requested-by chains.
    GeneratedBuilds(Vec<BuildInfo>),
    /// Raw newline-separated list of dep-tree plugin output paths.
    PluginFiles(Vec<u8>),
}

/// External collaborator that actually runs the build tool.
/// Implementations shell out to Maven or Gradle; the engine only consumes
/// what they return.
pub trait BuildToolDriver {
    fn collect(&self, params: &DepTreeParams) -> GavelResult<ToolOutput>;
}

// ─── Orchestration ─────────────────────────────────────────────────

/// Build the full dependency graph for one audit run: one root node per
/// module, in input order, plus the sorted list of every canonical
/// identifier seen anywhere in the graph.
pub fn build_dependency_tree(
    driver: &dyn BuildToolDriver,
    params: &DepTreeParams,
    build_config: &BuildConfiguration,
) -> GavelResult<(Vec<GraphNode>, Vec<String>)> {
    info!(
        technology = %params.technology,
        build = %build_config.build_name,
        "building dependency tree"
    );
    match driver.collect(params)? {
        ToolOutput::GeneratedBuilds(builds) => {
            graph_from_generated_builds(&builds, params, build_config)
        }
        ToolOutput::PluginFiles(raw) => graph_from_plugin_output(&raw, params),
    }
}

/// Requested-by route: one tree per module of the first generated build.
fn graph_from_generated_builds(
    builds: &[BuildInfo],
    params: &DepTreeParams,
    build_config: &BuildConfiguration,
) -> GavelResult<(Vec<GraphNode>, Vec<String>)> {
    let build = builds.first().ok_or_else(|| GavelError::BuildNotFound {
        build_name: build_config.build_name.clone(),
        build_number: build_config.build_number.clone(),
    })?;

    // Modules are independent; fan out, then merge the per-module
    // collectors so the final set never needs a lock.
    let package_type = params.technology.package_type();
    let per_module: Vec<(GraphNode, UniqueDeps)> = build
        .modules
        .par_iter()
        .map(|module| {
            let mut module_deps = UniqueDeps::new();
            let tree = requested_by::module_tree(module, package_type, &mut module_deps);
            (tree, module_deps)
        })
        .collect();

    let mut graph = Vec::with_capacity(per_module.len());
    let mut unique_deps = UniqueDeps::new();
    for (tree, module_deps) in per_module {
        graph.push(tree);
        unique_deps.merge(module_deps);
    }
    debug!(
        modules = graph.len(),
        unique = unique_deps.len(),
        "requested-by graph complete"
    );
    Ok((graph, unique_deps.into_vec()))
}

/// Plugin route: decode the path list, then materialize each module tree.
fn graph_from_plugin_output(
    raw: &[u8],
    params: &DepTreeParams,
) -> GavelResult<(Vec<GraphNode>, Vec<String>)> {
    let modules = ingest::parse_dep_tree_output(raw)?;
    let mut unique_deps = UniqueDeps::new();
    let graph = plugin_tree::module_trees(&modules, params.technology.package_type(), &mut unique_deps);
    debug!(
        modules = graph.len(),
        unique = unique_deps.len(),
        "plugin-tree graph complete"
    );
    Ok((graph, unique_deps.into_vec()))
}
