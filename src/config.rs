//! Board configuration.
//!
//! All filesystem roots and well-known artifact names live here as explicit
//! values handed to the aggregator and the server, with defaults derived from
//! the workspace the process was started in. Nothing path-related is ambient
//! process state.

use std::path::{Path, PathBuf};

/// Directory under the artifact root holding story files and the sprint table.
pub const IMPLEMENTATION_ARTIFACTS_DIR: &str = "implementation-artifacts";
/// Directory under the artifact root holding the planning documents.
pub const PLANNING_ARTIFACTS_DIR: &str = "planning-artifacts";
/// The status table file name.
pub const SPRINT_STATUS_FILE: &str = "sprint-status.yaml";
/// Planning document scanned before the epics document.
pub const VISUALIZATION_FILE: &str = "epics-stories-visualization.md";
/// The epics planning document.
pub const EPICS_FILE: &str = "epics.md";
/// File name of the dashboard page, also one of its request paths.
pub const DASHBOARD_FILE: &str = "bmad-local-dashboard.html";

/// Resolved filesystem roots for one server instance.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Root against which relative `output` overrides are resolved.
    pub workspace_root: PathBuf,
    /// The `_bmad` sibling root, reported in the snapshot.
    pub bmad_root: PathBuf,
    /// Artifact root used when a request supplies no `output` override.
    pub default_output: PathBuf,
    /// On-disk location of the dashboard HTML asset.
    pub dashboard_file: PathBuf,
}

impl BoardConfig {
    /// Conventional layout beneath a workspace root.
    pub fn from_workspace(workspace_root: PathBuf) -> Self {
        let bmad_root = workspace_root.join("_bmad");
        let default_output = workspace_root.join("_bmad-output");
        let dashboard_file = workspace_root.join("ui").join(DASHBOARD_FILE);
        Self {
            workspace_root,
            bmad_root,
            default_output,
            dashboard_file,
        }
    }

    /// Resolve a request-supplied artifact-root override.
    ///
    /// Absent or blank input falls back to the default output root. A leading
    /// `~` is expanded to the home directory. Relative paths are resolved
    /// against the workspace root; absolute paths are used as-is.
    pub fn resolve_output(&self, raw: Option<&str>) -> PathBuf {
        let raw = raw.map(str::trim).unwrap_or("");
        if raw.is_empty() {
            return self.default_output.clone();
        }
        let candidate = expand_home(raw);
        if candidate.is_absolute() {
            candidate
        } else {
            self.workspace_root.join(candidate)
        }
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Well-known locations beneath one artifact root.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub implementation_dir: PathBuf,
    pub planning_dir: PathBuf,
    pub sprint_status_file: PathBuf,
    pub visualization_file: PathBuf,
    pub epics_file: PathBuf,
}

impl ArtifactPaths {
    pub fn new(output_dir: &Path) -> Self {
        let implementation_dir = output_dir.join(IMPLEMENTATION_ARTIFACTS_DIR);
        let planning_dir = output_dir.join(PLANNING_ARTIFACTS_DIR);
        let sprint_status_file = implementation_dir.join(SPRINT_STATUS_FILE);
        let visualization_file = planning_dir.join(VISUALIZATION_FILE);
        let epics_file = planning_dir.join(EPICS_FILE);
        Self {
            implementation_dir,
            planning_dir,
            sprint_status_file,
            visualization_file,
            epics_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BoardConfig {
        BoardConfig::from_workspace(PathBuf::from("/ws"))
    }

    #[test]
    fn test_from_workspace_layout() {
        let config = config();
        assert_eq!(config.bmad_root, PathBuf::from("/ws/_bmad"));
        assert_eq!(config.default_output, PathBuf::from("/ws/_bmad-output"));
        assert_eq!(
            config.dashboard_file,
            PathBuf::from("/ws/ui/bmad-local-dashboard.html")
        );
    }

    #[test]
    fn test_resolve_output_default_when_absent() {
        let config = config();
        assert_eq!(config.resolve_output(None), config.default_output);
        assert_eq!(config.resolve_output(Some("")), config.default_output);
        assert_eq!(config.resolve_output(Some("   ")), config.default_output);
    }

    #[test]
    fn test_resolve_output_relative_joins_workspace() {
        let config = config();
        assert_eq!(
            config.resolve_output(Some("demo/_bmad-output")),
            PathBuf::from("/ws/demo/_bmad-output")
        );
    }

    #[test]
    fn test_resolve_output_absolute_used_as_is() {
        let config = config();
        assert_eq!(
            config.resolve_output(Some("/elsewhere/out")),
            PathBuf::from("/elsewhere/out")
        );
    }

    #[test]
    fn test_resolve_output_trims_whitespace() {
        let config = config();
        assert_eq!(
            config.resolve_output(Some("  demo  ")),
            PathBuf::from("/ws/demo")
        );
    }

    #[test]
    fn test_resolve_output_expands_home() {
        let config = config();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.resolve_output(Some("~/out")), home.join("out"));
        }
    }

    #[test]
    fn test_artifact_paths_layout() {
        let paths = ArtifactPaths::new(Path::new("/ws/_bmad-output"));
        assert_eq!(
            paths.sprint_status_file,
            PathBuf::from("/ws/_bmad-output/implementation-artifacts/sprint-status.yaml")
        );
        assert_eq!(
            paths.visualization_file,
            PathBuf::from("/ws/_bmad-output/planning-artifacts/epics-stories-visualization.md")
        );
        assert_eq!(
            paths.epics_file,
            PathBuf::from("/ws/_bmad-output/planning-artifacts/epics.md")
        );
    }
}
