//! # gavel — Build-Tool Dependency Graph Engine
//!
//! Reconstructs accurate, de-duplicated, cycle-safe dependency graphs for
//! Java build modules from heterogeneous, loosely-structured build-tool
//! output. Two raw sources normalize into one tree representation:
//!
//! - a generated build-info record whose flat dependency lists carry
//!   "requested-by" ancestor chains (who pulled each dependency in), and
//! - per-module JSON tree dumps written by the gradle-dep-tree and
//!   maven-dep-tree plugins, referenced by a newline-separated path list.
//!
//! ## Architecture
//!
//! ```text
//!   Maven / Gradle (external)
//!        │
//!        ▼
//!  ┌───────────────┐  build-info record    ┌───────────────────────┐
//!  │BuildToolDriver│──────────────────────→│ requested-by populator│
//!  │  (collector)  │  plugin path list     │ plugin-tree populator │
//!  └───────────────┘───→ ingest ──────────→└──────────┬────────────┘
//!                                                     │
//!                                     one GraphNode per module
//!                                     + global unique id set
//! ```
//!
//! The engine never runs the build tool itself and never talks to a
//! server; it consumes tool output and hands the finished graph to
//! downstream consumers (vulnerability lookup, reporting).
//!
//! Dependency cycles are legal in the consumed ecosystems (version
//! mediation can produce them), so both populators truncate the cyclic
//! branch and keep going — a cycle is never an error.

pub mod build_info;
pub mod engine;
pub mod graph;
pub mod ingest;

// Re-exports for convenience
pub use build_info::{BuildConfiguration, BuildInfo, Dependency, Module, Technology};
pub use engine::{build_dependency_tree, BuildToolDriver, DepTreeParams, ToolOutput};
pub use graph::{GraphNode, PackageType, UniqueDeps};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GavelError {
    #[error("couldn't find build {build_name}/{build_number}")]
    BuildNotFound {
        build_name: String,
        build_number: String,
    },

    #[error("failed to read dep-tree output file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed dep-tree JSON in {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GavelResult<T> = Result<T, GavelError>;
