//! Generated files and their deterministic destinations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One generated file: a path relative to the project root plus its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Artifact {
    /// Destination relative to the project root
    path: PathBuf,
    /// Full file content
    content: String,
}

impl Artifact {
    /// Create an artifact.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Destination joined onto `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }
}

/// Destination paths for every file the pipeline generates.
///
/// All paths are pure functions of the resource name.
///
/// # Examples
///
/// ```
/// use coder_core::ArtifactPaths;
///
/// let paths = ArtifactPaths::for_resource("workspace");
/// assert_eq!(paths.resource_type().to_str(), Some("api/v1/workspace_types.go"));
/// assert_eq!(paths.storage_interface().to_str(), Some("pkg/storage/storage.go"));
/// assert_eq!(
///     paths.controller_test().to_str(),
///     Some("controllers/workspace_controller_test.go")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ArtifactPaths {
    /// `api/v1/{resource}_types.go`
    resource_type: PathBuf,
    /// `pkg/storage/storage.go`
    storage_interface: PathBuf,
    /// `pkg/storage/postgrest.go`
    storage_impl: PathBuf,
    /// `controllers/{resource}_controller.go`
    controller_impl: PathBuf,
    /// `controllers/{resource}_controller_test.go`
    controller_test: PathBuf,
}

impl ArtifactPaths {
    /// Storage interface location, shared by every resource.
    pub const STORAGE_INTERFACE: &'static str = "pkg/storage/storage.go";
    /// Storage implementation location, shared by every resource.
    pub const STORAGE_IMPL: &'static str = "pkg/storage/postgrest.go";

    /// Compute the paths for `resource_name`.
    pub fn for_resource(resource_name: &str) -> Self {
        Self {
            resource_type: PathBuf::from(format!("api/v1/{}_types.go", resource_name)),
            storage_interface: PathBuf::from(Self::STORAGE_INTERFACE),
            storage_impl: PathBuf::from(Self::STORAGE_IMPL),
            controller_impl: PathBuf::from(format!("controllers/{}_controller.go", resource_name)),
            controller_test: PathBuf::from(format!(
                "controllers/{}_controller_test.go",
                resource_name
            )),
        }
    }
}

/// The ordered set of files produced by one pipeline run.
///
/// Order is fixed: type file, storage interface, storage implementation,
/// controller implementation, controller test.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactSet {
    resource_name: String,
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    /// Assemble the five pipeline outputs for `resource_name`.
    pub fn assemble(
        resource_name: impl Into<String>,
        go_type: impl Into<String>,
        storage_interface_full: impl Into<String>,
        storage_impl_full: impl Into<String>,
        controller_impl: impl Into<String>,
        controller_test: impl Into<String>,
    ) -> Self {
        let resource_name = resource_name.into();
        let paths = ArtifactPaths::for_resource(&resource_name);
        let artifacts = vec![
            Artifact::new(paths.resource_type, go_type),
            Artifact::new(paths.storage_interface, storage_interface_full),
            Artifact::new(paths.storage_impl, storage_impl_full),
            Artifact::new(paths.controller_impl, controller_impl),
            Artifact::new(paths.controller_test, controller_test),
        ];
        Self {
            resource_name,
            artifacts,
        }
    }

    /// Resource the artifacts were generated for.
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Artifacts in their fixed order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Number of artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// True when the set holds no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Iterate over artifacts in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    /// Find the artifact destined for `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path.as_ref())
    }
}

impl<'a> IntoIterator for &'a ArtifactSet {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}
