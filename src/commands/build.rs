use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::build_pipeline;
use crate::commands::{display_path, load_target, print_warnings};

pub fn execute(target: &str, archive: bool) -> Result<()> {
    let start = Instant::now();

    // 1. Load configuration (manifest or bare specification)
    let (mut config, project_dir) = load_target(target)?;
    if archive {
        config.build.archive = true;
    }

    // 2. Run build pipeline (with clean)
    let result = build_pipeline::execute_build(&config, &project_dir, true)?;

    // 3. Report results
    print_warnings(&result.warnings);

    println!(
        "   {} {} ({} unit(s)) in {}",
        "Compiled".green().bold(),
        result.app_name,
        result.units_written,
        display_path(&result.output_dir)
    );
    if let Some(zip_path) = &result.archive {
        println!("   {} {}", "Archived".green().bold(), display_path(zip_path));
    }
    println!(
        "    {} build in {:.2}s",
        "Finished".green().bold(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
