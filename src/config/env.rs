//! Environment/dotfile configuration loading.
//!
//! This is the one piece of configuration handling the core contract
//! calls out as an external collaborator: nothing in `strategy`, `shaper`,
//! or any other core module depends on this module existing. It exists so
//! a host that just wants "read `SEGMENTATION_*` env vars and some `.env`
//! files" doesn't have to write that glue itself.
//!
//! Binding rules: prefix `SEGMENTATION_`, nested delimiter `__` (so
//! `SEGMENTATION_DURATION__OVERLAP` sets `duration.overlap`),
//! case-insensitive. `.env` files are read in ascending precedence —
//! `.env.segmentation.defaults`, `.env.segmentation`, `.env.defaults`,
//! `.env` — each later file overriding keys the earlier ones set, without
//! touching variables already present in the process environment.

use std::collections::HashMap;
use std::path::Path;

use config::{Config, Environment};
use serde::de::DeserializeOwned;

use crate::error::Error;

const ENV_PREFIX: &str = "SEGMENTATION";
const ENV_FILES: &[&str] = &[
    ".env.segmentation.defaults",
    ".env.segmentation",
    ".env.defaults",
    ".env",
];

/// Loads and binds a settings group (e.g. [`crate::config::DurationConfig`])
/// from `.env*` files and `SEGMENTATION_`-prefixed environment variables.
///
/// `section` is the nested-delimiter key the group lives under, e.g.
/// `"duration"` binds `SEGMENTATION_DURATION__OVERLAP` to `overlap`.
pub fn load_section<T: DeserializeOwned>(section: &str) -> Result<T, Error> {
    let merged = merge_dotenv_files();

    let mut builder = Config::builder();
    for (key, value) in &merged {
        if std::env::var(key).is_err() {
            builder = builder
                .set_override(config_key_for(key), value.clone())
                .map_err(|e| env_error(section, e))?;
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build().map_err(|e| env_error(section, e))?;

    config.get::<T>(section).map_err(|e| env_error(section, e))
}

fn env_error(section: &str, err: config::ConfigError) -> Error {
    Error::Configuration {
        setting_name: section.to_string(),
        value: String::new(),
        reason: err.to_string(),
    }
}

/// Translates a raw `SEGMENTATION_FOO__BAR` env-var-style key into the
/// dotted path `config::Config` expects internally (`foo.bar`), lowercased.
fn config_key_for(raw_key: &str) -> String {
    raw_key
        .strip_prefix(ENV_PREFIX)
        .and_then(|s| s.strip_prefix('_'))
        .unwrap_or(raw_key)
        .to_lowercase()
        .replace("__", ".")
}

/// Reads the precedence-ordered `.env*` files and merges them into one map.
/// `ENV_FILES` is listed lowest-precedence first, so iterating it in order
/// and inserting means the last file processed (plain `.env`) wins ties.
/// Missing files are skipped silently; they're optional layers, not
/// required configuration.
fn merge_dotenv_files() -> HashMap<String, String> {
    let mut merged = HashMap::new();
    for path in ENV_FILES.iter() {
        if let Ok(iter) = dotenvy::from_path_iter(Path::new(path)) {
            for item in iter.flatten() {
                merged.insert(item.0, item.1);
            }
        }
    }
    merged
}
