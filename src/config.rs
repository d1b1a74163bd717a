use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::compiler::naming::package_name;

pub const MANIFEST_FILE: &str = "fluttergen.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Dart package name written to `pubspec.yaml`.
    pub name: String,
    #[serde(default = "default_spec")]
    pub spec: String,
    #[serde(default = "default_description")]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Directory copied into the output before generated files are written.
    pub skeleton: Option<String>,
    #[serde(default)]
    pub archive: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            skeleton: None,
            archive: false,
        }
    }
}

fn default_spec() -> String {
    "app.json".to_string()
}

fn default_description() -> String {
    "A Flutter application generated by fluttergen.".to_string()
}

fn default_output_dir() -> String {
    "build".to_string()
}

impl Config {
    /// Configuration for a bare specification file with no manifest.
    pub fn for_spec_file(spec_path: &Path, app_name: &str) -> Self {
        Config {
            project: ProjectConfig {
                name: package_name(app_name),
                spec: spec_path.to_string_lossy().into_owned(),
                description: default_description(),
            },
            build: BuildConfig::default(),
        }
    }
}

/// Load and parse fluttergen.toml configuration file
pub fn load_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("could not find `{}` in current directory", path)
            } else {
                anyhow::anyhow!("failed to read `{}`: {}", path, e)
            }
        })?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse `{}`: {}", path, e))?;

    validate_package_name(&config.project.name)?;
    if config.build.output_dir.trim().is_empty() {
        anyhow::bail!("`build.output_dir` in `{}` must not be empty", path);
    }

    Ok(config)
}

/// Dart package names are lower_snake_case identifiers.
pub fn validate_package_name(name: &str) -> Result<()> {
    let Some(first) = name.chars().next() else {
        anyhow::bail!("Invalid package name ''. It must not be empty");
    };

    if !first.is_ascii_lowercase() {
        anyhow::bail!(
            "Invalid package name '{}'. It must start with a lowercase letter",
            name
        );
    }

    for ch in name.chars() {
        if !ch.is_ascii_lowercase() && !ch.is_ascii_digit() && ch != '_' {
            anyhow::bail!(
                "Invalid package name '{}'. It contains invalid character '{}'",
                name,
                ch
            );
        }
    }

    Ok(())
}
