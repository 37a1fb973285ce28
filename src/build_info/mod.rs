//! Build-info data model — what the external extraction step hands us
//!
//! The build-info record is produced outside the engine (a Maven/Gradle
//! run instrumented by the extractor). The shapes here mirror that wire
//! format: a build holds modules, a module holds a flat dependency list,
//! and each dependency carries the ancestor chains that explain why it
//! was pulled in.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::graph::PackageType;
use crate::GavelResult;

// ─── Wire shapes ───────────────────────────────────────────────────

/// One generated build-info record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfo {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A single build module and its flat dependency list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// A dependency as reported by the build tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// Raw, unprefixed coordinate.
    pub id: String,
    /// Ancestor chains, innermost requester first. No chains at all, or an
    /// empty first chain, means the module itself requested this.
    #[serde(default, rename = "requestedBy")]
    pub requested_by: Vec<Vec<String>>,
}

impl Dependency {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            requested_by: Vec::new(),
        }
    }

    pub fn requested_by(mut self, chains: Vec<Vec<String>>) -> Self {
        self.requested_by = chains;
        self
    }
}

// ─── Technology ────────────────────────────────────────────────────

/// Which build tool produced the output being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    Maven,
    Gradle,
}

impl Technology {
    /// Identifier scheme for coordinates produced by this tool. Both Java
    /// build tools emit GAV coordinates.
    pub fn package_type(self) -> PackageType {
        match self {
            Self::Maven | Self::Gradle => PackageType::Gav,
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maven => write!(f, "maven"),
            Self::Gradle => write!(f, "gradle"),
        }
    }
}

// ─── Build run configuration ───────────────────────────────────────

/// Identifies one audit build run. The build number is stamped from the
/// clock so repeated audits of the same project never collide.
#[derive(Debug, Clone)]
pub struct BuildConfiguration {
    pub build_name: String,
    pub build_number: String,
    pub project: Option<String>,
    staging_dir: Option<PathBuf>,
}

impl BuildConfiguration {
    pub fn new(build_name: impl Into<String>) -> Self {
        Self {
            build_name: build_name.into(),
            build_number: Utc::now().timestamp().to_string(),
            project: None,
            staging_dir: None,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Directory the extraction step stages its generated build-info under.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Remove the run's staging directory once the graph has been handed
    /// off. Removal errors surface to the caller.
    pub fn cleanup(&self) -> GavelResult<()> {
        if let Some(dir) = &self.staging_dir {
            if dir.exists() {
                fs::remove_dir_all(dir)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_wire_shape() {
        let dep: Dependency = serde_json::from_str(
            r#"{"id": "org.slf4j:slf4j-api:1.7.36", "requestedBy": [["com.acme:app:1.0"]]}"#,
        )
        .unwrap();
        assert_eq!(dep.id, "org.slf4j:slf4j-api:1.7.36");
        assert_eq!(dep.requested_by, vec![vec!["com.acme:app:1.0".to_string()]]);
    }

    #[test]
    fn test_dependency_requested_by_defaults_empty() {
        let dep: Dependency = serde_json::from_str(r#"{"id": "junit:junit:4.13.2"}"#).unwrap();
        assert!(dep.requested_by.is_empty());
    }

    #[test]
    fn test_technology_display_and_scheme() {
        assert_eq!(Technology::Maven.to_string(), "maven");
        assert_eq!(Technology::Gradle.to_string(), "gradle");
        assert_eq!(Technology::Maven.package_type(), PackageType::Gav);
        assert_eq!(Technology::Gradle.package_type(), PackageType::Gav);
    }

    #[test]
    fn test_build_configuration_stamps_number() {
        let config = BuildConfiguration::new("audit-mvn");
        assert_eq!(config.build_name, "audit-mvn");
        assert!(config.build_number.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_cleanup_removes_staging_dir() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("generated");
        fs::create_dir_all(staging.join("partials")).unwrap();

        let config = BuildConfiguration::new("audit-gradle").with_staging_dir(&staging);
        config.cleanup().unwrap();
        assert!(!staging.exists());
    }

    #[test]
    fn test_cleanup_without_staging_dir_is_noop() {
        BuildConfiguration::new("audit-mvn").cleanup().unwrap();
    }
}
