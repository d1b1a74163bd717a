use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::compiler::CompiledApp;
use crate::config::Config;

/// Dart SDK constraint written to generated pubspecs.
pub const DART_SDK: &str = ">=3.0.0 <4.0.0";

/// Generate the Flutter project files around the compiled units
pub fn generate(config: &Config, app: &CompiledApp, output_dir: &Path) -> Result<()> {
    generate_pubspec(config, app, output_dir)?;
    generate_analysis_options(output_dir)?;
    generate_gitignore(output_dir)?;

    Ok(())
}

/// Render pubspec.yaml; generated imports become dependencies
pub fn pubspec(config: &Config, app: &CompiledApp) -> String {
    let mut dependencies = String::new();
    for package in app.dependencies() {
        dependencies.push_str(&format!("  {}: any\n", package));
    }

    format!(
        r#"name: {}
description: "{}"
publish_to: "none"
version: 1.0.0+1

environment:
  sdk: "{}"

dependencies:
  flutter:
    sdk: flutter
{}
dev_dependencies:
  flutter_test:
    sdk: flutter
  flutter_lints: ^4.0.0

flutter:
  uses-material-design: true
"#,
        config.project.name,
        config.project.description.replace('"', "\\\""),
        DART_SDK,
        dependencies
    )
}

/// Generate pubspec.yaml
fn generate_pubspec(config: &Config, app: &CompiledApp, output_dir: &Path) -> Result<()> {
    fs::write(output_dir.join("pubspec.yaml"), pubspec(config, app))
        .context("Failed to write pubspec.yaml")?;
    Ok(())
}

/// Generate analysis_options.yaml
fn generate_analysis_options(output_dir: &Path) -> Result<()> {
    // Generated state fields keep the snake_case names derived from labels.
    let content = r#"include: package:flutter_lints/flutter.yaml

linter:
  rules:
    non_constant_identifier_names: false
    prefer_const_constructors: false
"#;
    fs::write(output_dir.join("analysis_options.yaml"), content)
        .context("Failed to write analysis_options.yaml")?;
    Ok(())
}

/// Generate .gitignore
fn generate_gitignore(output_dir: &Path) -> Result<()> {
    let content = r#"# Flutter/Dart build output
.dart_tool/
.flutter-plugins
.flutter-plugins-dependencies
.packages
build/

# IDE
.idea/
.vscode/
*.iml
"#;
    fs::write(output_dir.join(".gitignore"), content)
        .context("Failed to write .gitignore")?;
    Ok(())
}
