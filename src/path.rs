//! Output directory resolution.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolves the directory a segment (or its manifest) should be written
/// into, optionally nested by the source file's stem and/or the segment
/// index, and creates it.
///
/// - `in_subdir`: append `Path(original_name).stem`. Requires
///   `original_name` to be `Some`.
/// - `segment_in_subdir`: append `segment_<index>`. Requires
///   `segment_index` to be `Some`.
pub fn build_output_directory(
    output_directory: &Path,
    in_subdir: bool,
    segment_in_subdir: bool,
    original_name: Option<&str>,
    segment_index: Option<usize>,
) -> Result<PathBuf> {
    let mut dir = output_directory.to_path_buf();

    if in_subdir {
        let name = original_name.ok_or_else(|| Error::Configuration {
            setting_name: "output_in_subdirectory".to_string(),
            value: "true".to_string(),
            reason: "original_name is required when output_in_subdirectory is set".to_string(),
        })?;
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        dir.push(stem);
    }

    if segment_in_subdir {
        let index = segment_index.ok_or_else(|| Error::Configuration {
            setting_name: "output_segment_in_subdirectory".to_string(),
            value: "true".to_string(),
            reason: "segment_index is required when output_segment_in_subdirectory is set"
                .to_string(),
        })?;
        dir.push(format!("segment_{index}"));
    }

    std::fs::create_dir_all(&dir).map_err(|e| classify_directory_error(&dir, e))?;

    Ok(dir)
}

/// Joins a resolved directory and a filename.
pub fn build_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(filename)
}

fn classify_directory_error(path: &Path, err: io::Error) -> Error {
    let reason = if err.kind() == io::ErrorKind::PermissionDenied {
        format!("permission denied: {err}")
    } else {
        err.to_string()
    };
    Error::OutputDirectory {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_directory_with_no_subdirs() {
        let root = tempdir().unwrap();
        let dir = build_output_directory(root.path(), false, false, None, None).unwrap();
        assert_eq!(dir, root.path());
    }

    #[test]
    fn nests_by_original_name_stem() {
        let root = tempdir().unwrap();
        let dir =
            build_output_directory(root.path(), true, false, Some("clip.wav"), None).unwrap();
        assert_eq!(dir, root.path().join("clip"));
        assert!(dir.is_dir());
    }

    #[test]
    fn nests_by_segment_index() {
        let root = tempdir().unwrap();
        let dir = build_output_directory(root.path(), false, true, None, Some(3)).unwrap();
        assert_eq!(dir, root.path().join("segment_3"));
    }

    #[test]
    fn requires_original_name_when_in_subdir() {
        let root = tempdir().unwrap();
        let err = build_output_directory(root.path(), true, false, None, None).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn requires_segment_index_when_segment_in_subdir() {
        let root = tempdir().unwrap();
        let err = build_output_directory(root.path(), false, true, None, None).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn build_path_joins_dir_and_filename() {
        assert_eq!(
            build_path(Path::new("/tmp/out"), "a_segment_0.wav"),
            Path::new("/tmp/out/a_segment_0.wav")
        );
    }
}
