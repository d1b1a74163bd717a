use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::build_pipeline;
use crate::commands::{load_target, print_warnings};

/// Validate a specification without writing anything
pub fn execute(target: &str) -> Result<()> {
    let start = Instant::now();

    let (config, project_dir) = load_target(target)?;
    let spec_path = project_dir.join(&config.project.spec);
    let app = build_pipeline::compile_spec(&spec_path)?;

    print_warnings(&app.warnings);

    let pages = app.units.len().saturating_sub(1);
    println!(
        "   {} {} page(s), {} warning(s) in {:.2}s",
        "Checked".green().bold(),
        pages,
        app.warnings.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
