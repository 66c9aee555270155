//! The tracked-file manifest (`ccoco.config.json`).
//!
//! ```json
//! {
//!   "files": [".env", "config/db.json"]
//! }
//! ```
//!
//! Missing file, missing `files` or an empty `files` array all fall back to
//! the default manifest (`.env` only). Unknown fields are ignored so that
//! manifests written by older releases still load.

use std::io::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{CcocoError, Result};
use crate::layout::check_logical;

/// The file tracked when the manifest names none.
pub const DEFAULT_TRACKED_FILE: &str = ".env";

/// Errors from parsing or editing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest is not valid JSON, or not the expected shape.
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry would resolve outside the repository root.
    #[error("tracked path '{path}' {reason}")]
    InvalidPath {
        /// The entry as given.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Ordered, duplicate-free list of tracked logical paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    files: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            files: vec![DEFAULT_TRACKED_FILE.to_owned()],
        }
    }
}

impl Manifest {
    /// Build a manifest from logical paths, normalizing and deduplicating.
    ///
    /// An empty input yields the default manifest.
    ///
    /// # Errors
    /// Returns [`ManifestError::InvalidPath`] for absolute paths or paths
    /// that climb out of the repository root.
    pub fn new<I, S>(files: I) -> std::result::Result<Self, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut manifest = Self { files: Vec::new() };
        manifest.add(files)?;
        Ok(manifest.or_default())
    }

    /// Tracked logical paths in insertion order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Load the manifest at `path`.
    ///
    /// # Errors
    /// Returns [`CcocoError::Io`] on read errors other than not-found and
    /// [`CcocoError::Manifest`] on invalid JSON or an entry outside the
    /// repository root.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no manifest, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(CcocoError::io(path, e)),
        };
        Self::parse(&contents).map_err(|source| CcocoError::Manifest {
            path: path.to_owned(),
            source,
        })
    }

    /// Parse a manifest from a JSON string.
    ///
    /// # Errors
    /// Returns [`ManifestError::Json`] (with line and column) on invalid
    /// JSON and [`ManifestError::InvalidPath`] for unsafe entries.
    pub fn parse(json: &str) -> std::result::Result<Self, ManifestError> {
        let raw: Self = serde_json::from_str(json)?;
        Self::new(raw.files)
    }

    /// Write the manifest to `path` as pretty-printed JSON.
    ///
    /// The file is replaced atomically: content goes to a temp file in the
    /// same directory which is then renamed over `path`.
    ///
    /// # Errors
    /// Returns [`CcocoError::Io`] if the temp file cannot be written or
    /// persisted.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| CcocoError::Manifest {
            path: path.to_owned(),
            source: e.into(),
        })?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| CcocoError::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| CcocoError::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| CcocoError::io(path, e.error))?;
        Ok(())
    }

    /// Add logical paths. Returns the ones that were not already tracked.
    ///
    /// Every path is checked before any is added, so a rejected entry
    /// leaves the manifest unchanged. Empty entries are ignored.
    ///
    /// # Errors
    /// Returns [`ManifestError::InvalidPath`] for absolute paths or paths
    /// with a `..` segment.
    pub fn add<I, S>(&mut self, files: I) -> std::result::Result<Vec<String>, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates = Vec::new();
        for file in files {
            let file = normalize(file.as_ref());
            if file.is_empty() {
                continue;
            }
            check_logical(&file).map_err(|reason| ManifestError::InvalidPath {
                path: file.clone(),
                reason,
            })?;
            candidates.push(file);
        }

        let mut added = Vec::new();
        for file in candidates {
            if self.files.contains(&file) {
                continue;
            }
            self.files.push(file.clone());
            added.push(file);
        }
        Ok(added)
    }

    /// Remove logical paths. Returns the ones that were tracked.
    ///
    /// Removing every entry leaves an empty list, which loads back as the
    /// default manifest.
    pub fn remove<I, S>(&mut self, files: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets: Vec<String> = files.into_iter().map(|f| normalize(f.as_ref())).collect();
        let mut removed = Vec::new();
        self.files.retain(|f| {
            let hit = targets.contains(f);
            if hit {
                removed.push(f.clone());
            }
            !hit
        });
        removed
    }

    fn or_default(self) -> Self {
        if self.files.is_empty() {
            Self::default()
        } else {
            self
        }
    }
}

/// Normalize a logical path: platform separators become `/` and trailing
/// separators are dropped.
#[must_use]
pub fn normalize(path: &str) -> String {
    let slashed = if std::path::MAIN_SEPARATOR == '/' {
        path.to_owned()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    };
    let trimmed = slashed.trim_end_matches('/');
    if trimmed.is_empty() && !slashed.is_empty() {
        "/".to_owned()
    } else {
        trimmed.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tracks_dotenv() {
        assert_eq!(Manifest::default().files(), [".env"]);
    }

    #[test]
    fn parse_preserves_order_and_dedupes() {
        let m = Manifest::parse(r#"{"files":["b.env",".env","b.env","config/db.json"]}"#).unwrap();
        assert_eq!(m.files(), ["b.env", ".env", "config/db.json"]);
    }

    #[test]
    fn parse_empty_array_uses_default() {
        let m = Manifest::parse(r#"{"files":[]}"#).unwrap();
        assert_eq!(m, Manifest::default());
    }

    #[test]
    fn parse_missing_field_uses_default() {
        let m = Manifest::parse("{}").unwrap();
        assert_eq!(m, Manifest::default());
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let m = Manifest::parse(r#"{"files":["a"],"strict":true}"#).unwrap();
        assert_eq!(m.files(), ["a"]);
    }

    #[test]
    fn parse_invalid_json_reports_position() {
        let err = Manifest::parse("{\"files\": [").unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)));
        assert!(err.to_string().contains("line"), "error should include position: {err}");
    }

    #[test]
    fn parse_trims_trailing_separator() {
        let m = Manifest::parse(r#"{"files":["config/"]}"#).unwrap();
        assert_eq!(m.files(), ["config"]);
    }

    #[test]
    fn load_missing_file_returns_default() {
        let m = Manifest::load(Path::new("/nonexistent/ccoco.config.json")).unwrap();
        assert_eq!(m, Manifest::default());
    }

    #[test]
    fn load_invalid_file_shows_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ccoco.config.json");
        std::fs::write(&path, "not json").unwrap();
        match Manifest::load(&path).unwrap_err() {
            CcocoError::Manifest { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(source, ManifestError::Json(_)));
            }
            other => panic!("expected Manifest error, got: {other:?}"),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ccoco.config.json");
        let m = Manifest::new([".env", "config/db.json"]).unwrap();
        m.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"files\": [\n    \".env\",\n    \"config/db.json\"\n  ]\n}");
        assert_eq!(Manifest::load(&path).unwrap(), m);
    }

    #[test]
    fn save_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ccoco.config.json");
        std::fs::write(&path, "garbage").unwrap();
        Manifest::new(["a"]).unwrap().save(&path).unwrap();
        assert_eq!(Manifest::load(&path).unwrap().files(), ["a"]);
    }

    #[test]
    fn add_reports_only_new_entries() {
        let mut m = Manifest::default();
        let added = m.add(["config/db.json", ".env", "config/db.json"]).unwrap();
        assert_eq!(added, ["config/db.json"]);
        assert_eq!(m.files(), [".env", "config/db.json"]);
    }

    #[test]
    fn remove_reports_removed_entries() {
        let mut m = Manifest::new([".env", "a", "b"]).unwrap();
        let removed = m.remove(["a", "missing"]);
        assert_eq!(removed, ["a"]);
        assert_eq!(m.files(), [".env", "b"]);
    }

    #[test]
    fn remove_all_round_trips_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ccoco.config.json");
        let mut m = Manifest::new(["a"]).unwrap();
        m.remove(["a"]);
        assert!(m.files().is_empty());
        m.save(&path).unwrap();
        assert_eq!(Manifest::load(&path).unwrap(), Manifest::default());
    }

    #[test]
    fn add_rejects_paths_outside_root() {
        for bad in ["/etc/passwd", "../secrets.env", "config/../../x.env"] {
            let mut m = Manifest::default();
            match m.add(["ok.env", bad]) {
                Err(ManifestError::InvalidPath { path, .. }) => assert_eq!(path, bad),
                other => panic!("expected InvalidPath for {bad:?}, got {other:?}"),
            }
            assert_eq!(m.files(), [".env"], "rejected add must not change the manifest");
        }
    }

    #[test]
    fn load_rejects_absolute_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ccoco.config.json");
        std::fs::write(&path, r#"{"files":[".env","/tmp/victim"]}"#).unwrap();
        match Manifest::load(&path).unwrap_err() {
            CcocoError::Manifest {
                source: ManifestError::InvalidPath { path, reason },
                ..
            } => {
                assert_eq!(path, "/tmp/victim");
                assert_eq!(reason, "is absolute");
            }
            other => panic!("expected InvalidPath, got: {other:?}"),
        }
    }

    #[test]
    fn normalize_paths() {
        assert_eq!(normalize("config/db.json"), "config/db.json");
        assert_eq!(normalize("config/"), "config");
        assert_eq!(normalize(""), "");
    }
}
