//! JSON manifest sidecar describing one written segment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One segment's provenance, serialized alongside it as `<name>.json`.
///
/// Field order is significant: it matches the order documented in this
/// crate's external interface and is preserved on the wire via
/// `serde_json`'s struct field ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub original_file: String,
    pub index: usize,
    pub segment_file: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl Manifest {
    /// Renders this manifest as four-space-indented JSON.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, serde_json::ser::PrettyFormatter::with_indent(b"    "));
        serde::Serialize::serialize(self, &mut serializer).map_err(Error::from)?;
        Ok(String::from_utf8(buf).expect("serde_json always produces valid utf-8"))
    }

    /// Serializes and writes this manifest to `path`, creating parent
    /// directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| manifest_error(path, e))?;
        }
        std::fs::write(path, json).map_err(|e| manifest_error(path, e))
    }
}

fn manifest_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Manifest {
        path: PathBuf::from(path),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Manifest {
        Manifest {
            original_file: "clip.wav".to_string(),
            index: 0,
            segment_file: "clip_segment_0.wav".to_string(),
            start_time: 1.25,
            end_time: 13.75,
        }
    }

    #[test]
    fn json_round_trips_all_fields() {
        let manifest = sample();
        let json = manifest.to_json().unwrap();
        let parsed: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn json_uses_four_space_indent() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\n    \"original_file\""));
    }

    #[test]
    fn write_to_creates_parent_directories() {
        let root = tempdir().unwrap();
        let path = root.path().join("nested/dir/manifest.json");
        sample().write_to(&path).unwrap();
        assert!(path.is_file());
    }
}
