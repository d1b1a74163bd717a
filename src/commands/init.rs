use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::compiler::naming::package_name;
use crate::config::MANIFEST_FILE;

const MANIFEST_TEMPLATE: &str = include_str!("../../templates/fluttergen.toml");
const SPEC_TEMPLATE: &str = include_str!("../../templates/app.json");
const GITIGNORE_TEMPLATE: &str = include_str!("../../templates/.gitignore");

pub fn execute(project_name: &str) -> Result<()> {
    let project_path = Path::new(project_name);

    // Check if directory already exists
    if project_path.exists() {
        anyhow::bail!("Directory '{}' already exists", project_name);
    }

    fs::create_dir_all(project_path)
        .context("Failed to create project directory")?;

    let app_name = project_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| project_name.to_string());

    let manifest_content = MANIFEST_TEMPLATE.replace("{{PACKAGE_NAME}}", &package_name(&app_name));
    fs::write(project_path.join(MANIFEST_FILE), manifest_content)
        .context(format!("Failed to write {}", MANIFEST_FILE))?;

    let spec_content = SPEC_TEMPLATE.replace("{{APP_NAME}}", &json_escape(&app_name));
    fs::write(project_path.join("app.json"), spec_content)
        .context("Failed to write app.json")?;

    fs::write(project_path.join(".gitignore"), GITIGNORE_TEMPLATE)
        .context("Failed to write .gitignore")?;

    println!(
        "     {} flutter app `{}`",
        "Created".green().bold(),
        project_name
    );

    Ok(())
}

/// Contents of a JSON string literal for `value`, without the quotes.
fn json_escape(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
