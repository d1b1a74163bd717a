use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::compiler::{self, CompiledApp, Specification, Warning};
use crate::config::Config;
use crate::flutter_scaffold;
use crate::package;

/// Represents the result of a build operation
#[derive(Debug)]
pub struct BuildResult {
    pub app_name: String,
    pub units_written: usize,
    pub output_dir: PathBuf,
    pub archive: Option<PathBuf>,
    pub warnings: Vec<Warning>,
}

/// Read and compile the specification a configuration points at
pub fn compile_spec(spec_path: &Path) -> Result<CompiledApp> {
    let source = fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to read {}", spec_path.display()))?;
    let spec = Specification::from_json(&source)
        .with_context(|| format!("Failed to load {}", spec_path.display()))?;
    let app = compiler::compile(&spec)
        .with_context(|| format!("Failed to compile {}", spec_path.display()))?;
    Ok(app)
}

/// Core build pipeline - used by the build command
///
/// # Arguments
/// * `config` - Parsed fluttergen.toml configuration
/// * `project_dir` - Directory the manifest's relative paths are resolved against
/// * `clean` - If true, remove and recreate output directory
///
/// The specification is compiled before anything is written, so a failed
/// compilation leaves the output directory untouched.
pub fn execute_build(config: &Config, project_dir: &Path, clean: bool) -> Result<BuildResult> {
    let spec_path = project_dir.join(&config.project.spec);
    let output_dir = project_dir.join(&config.build.output_dir);

    // 1. Compile
    let app = compile_spec(&spec_path)?;

    // 2. Clean output directory if requested
    guard_output_dir(project_dir, &output_dir)?;
    if clean && output_dir.exists() {
        fs::remove_dir_all(&output_dir)
            .context("Failed to clean output directory")?;
    }
    fs::create_dir_all(&output_dir)
        .context("Failed to create output directory")?;

    // 3. Copy the skeleton project, if any
    if let Some(skeleton) = &config.build.skeleton {
        let skeleton = project_dir.join(skeleton);
        copy_tree(&skeleton, &output_dir)
            .with_context(|| format!("Failed to copy skeleton {}", skeleton.display()))?;
    }

    // 4. Project files
    flutter_scaffold::generate(config, &app, &output_dir)
        .context("Failed to generate Flutter project scaffold")?;

    // 5. Generated units
    let units_written = write_units(&app, &output_dir)?;

    // 6. Archive
    let archive = if config.build.archive {
        let zip_path = output_dir.with_extension("zip");
        let files = package::archive(&output_dir, &zip_path)?;
        debug!(files, path = %zip_path.display(), "archived project");
        Some(zip_path)
    } else {
        None
    };

    Ok(BuildResult {
        app_name: app.app_name,
        units_written,
        output_dir,
        archive,
        warnings: app.warnings,
    })
}

/// Write every compilation unit below `output_dir`
pub fn write_units(app: &CompiledApp, output_dir: &Path) -> Result<usize> {
    for unit in &app.units {
        let path = output_dir.join(&unit.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &unit.source)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %unit.path, bytes = unit.source.len(), "wrote unit");
    }
    Ok(app.units.len())
}

/// Refuse output directories that would wipe the project itself
fn guard_output_dir(project_dir: &Path, output_dir: &Path) -> Result<()> {
    let project = project_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", project_dir.display()))?;
    let output = match output_dir.canonicalize() {
        Ok(path) => path,
        // Not created yet, so it cannot contain the project.
        Err(_) => return Ok(()),
    };
    if project.starts_with(&output) {
        anyhow::bail!(
            "output directory {} contains the project itself",
            output_dir.display()
        );
    }
    Ok(())
}

/// Recursively copy `from` into `to`, creating directories as needed
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        anyhow::bail!("{} is not a directory", from.display());
    }
    for entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from)?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildConfig, ProjectConfig};
    use tempfile::TempDir;

    const SPEC: &str = r##"{
        "name": "Demo",
        "theme": { "primary": "#2196F3" },
        "routes": ["/home"],
        "pages": [{ "name": "home", "title": "Home", "widgets": [ { "type": "text", "text": "Hi" } ] }]
    }"##;

    fn config(output_dir: &str) -> Config {
        Config {
            project: ProjectConfig {
                name: "demo".to_string(),
                spec: "app.json".to_string(),
                description: "Demo".to_string(),
            },
            build: BuildConfig {
                output_dir: output_dir.to_string(),
                skeleton: None,
                archive: false,
            },
        }
    }

    #[test]
    fn test_build_writes_project() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.json"), SPEC).unwrap();

        let result = execute_build(&config("build"), dir.path(), true).unwrap();

        assert_eq!(result.units_written, 2);
        assert_eq!(result.app_name, "DemoApp");
        assert!(dir.path().join("build/pubspec.yaml").exists());
        assert!(dir.path().join("build/lib/main.dart").exists());
        assert!(dir.path().join("build/lib/pages/home_page.dart").exists());
        assert!(result.archive.is_none());
    }

    #[test]
    fn test_failed_compile_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.json"), r#"{"name": "Demo"}"#).unwrap();

        let err = execute_build(&config("build"), dir.path(), true).unwrap_err();

        assert!(err.downcast_ref::<compiler::CompileError>().is_some());
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn test_refuses_to_clean_project_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.json"), SPEC).unwrap();

        assert!(execute_build(&config("."), dir.path(), true).is_err());
        assert!(dir.path().join("app.json").exists());
    }
}
