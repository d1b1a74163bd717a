pub mod init;
pub mod build;
pub mod compile;
pub mod check;
pub mod extract;

use anyhow::{Context, Result};
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

use crate::compiler::Warning;
use crate::config::{self, Config, MANIFEST_FILE};

/// Represents the type of target we're working with
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A fluttergen project directory (contains fluttergen.toml)
    Project(PathBuf), // manifest path
    /// A bare .json specification
    SpecFile(PathBuf),
}

/// Detect whether the target is a project directory or a single specification
pub fn detect_target(target: &str) -> Target {
    let path = Path::new(target);

    if target.ends_with(".json") {
        return Target::SpecFile(path.to_path_buf());
    }

    if path.is_dir() {
        return Target::Project(path.join(MANIFEST_FILE));
    }

    Target::Project(path.to_path_buf())
}

/// Load the configuration for a target, plus the directory its paths are relative to
pub fn load_target(target: &str) -> Result<(Config, PathBuf)> {
    let original_dir = env::current_dir()?;

    match detect_target(target) {
        Target::Project(manifest_path) => {
            let project_dir = match manifest_path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => original_dir.join(dir),
                _ => original_dir,
            };
            let config = config::load_config(&manifest_path.to_string_lossy()).context(format!(
                "Failed to load {}. Are you in a fluttergen project directory?",
                manifest_path.display()
            ))?;
            Ok((config, project_dir))
        }
        Target::SpecFile(spec_path) => {
            let source = std::fs::read_to_string(&spec_path)
                .with_context(|| format!("Failed to read {}", spec_path.display()))?;
            // Only the name is needed here; full validation happens when compiling.
            let name = serde_json::from_str::<serde_json::Value>(&source)
                .ok()
                .and_then(|v| v.get("name").and_then(|n| n.as_str()).map(str::to_string))
                .unwrap_or_else(|| {
                    spec_path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default()
                });
            let project_dir = match spec_path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => original_dir.join(dir),
                _ => original_dir,
            };
            let file_name = spec_path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| spec_path.clone());
            Ok((Config::for_spec_file(&file_name, &name), project_dir))
        }
    }
}

/// Print compiler warnings the way every command reports them
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

/// Show `path` relative to the current directory when it lies below it
pub fn display_path(path: &Path) -> String {
    match env::current_dir() {
        Ok(cwd) => path
            .strip_prefix(&cwd)
            .unwrap_or(path)
            .display()
            .to_string(),
        Err(_) => path.display().to_string(),
    }
}
