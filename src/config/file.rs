use serde::Deserialize;

/// Output container for a written segment. `Json` is reserved for
/// manifests and is never chosen as a segment's own `file_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Wav,
    Mp3,
    Flac,
    Aac,
    Json,
}

impl FileType {
    /// The extension appended to a formatted filename, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Wav => "wav",
            FileType::Mp3 => "mp3",
            FileType::Flac => "flac",
            FileType::Aac => "aac",
            FileType::Json => "json",
        }
    }
}

impl Default for FileType {
    fn default() -> Self {
        FileType::Wav
    }
}

/// Output layout settings: where segments land and how they're named.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default = "default_output_directory")]
    pub output_directory: String,
    #[serde(default = "default_output_in_subdirectory")]
    pub output_in_subdirectory: bool,
    #[serde(default = "default_output_segment_in_subdirectory")]
    pub output_segment_in_subdirectory: bool,
    #[serde(default = "default_name_template")]
    pub name_template: String,
    #[serde(default = "default_manifest_name_template")]
    pub manifest_name_template: String,
    #[serde(default)]
    pub file_format: FileType,
    #[serde(default = "default_generate_manifest")]
    pub generate_manifest: bool,
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_output_in_subdirectory() -> bool {
    true
}

fn default_output_segment_in_subdirectory() -> bool {
    false
}

fn default_name_template() -> String {
    "{original_name}_segment_{segment_index}".to_string()
}

fn default_manifest_name_template() -> String {
    "{original_name}_manifest_{segment_index}".to_string()
}

fn default_generate_manifest() -> bool {
    true
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            output_in_subdirectory: default_output_in_subdirectory(),
            output_segment_in_subdirectory: default_output_segment_in_subdirectory(),
            name_template: default_name_template(),
            manifest_name_template: default_manifest_name_template(),
            file_format: FileType::default(),
            generate_manifest: default_generate_manifest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let cfg = FileConfig::default();
        assert_eq!(cfg.output_directory, "output");
        assert!(cfg.output_in_subdirectory);
        assert!(!cfg.output_segment_in_subdirectory);
        assert_eq!(cfg.file_format, FileType::Wav);
        assert!(cfg.generate_manifest);
    }

    #[test]
    fn extensions_match_file_type() {
        assert_eq!(FileType::Wav.extension(), "wav");
        assert_eq!(FileType::Json.extension(), "json");
    }
}
