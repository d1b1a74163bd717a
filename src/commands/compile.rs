use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::build_pipeline;
use crate::commands::print_warnings;

/// Compile a single specification and print the generated Dart to stdout
/// (no Flutter project generation)
///
/// With `unit`, only that compilation unit (e.g. `lib/main.dart`) is printed.
/// With `output`, units are written below that directory instead.
pub fn execute(file: &str, unit: Option<&str>, output: Option<&str>) -> Result<()> {
    let start = Instant::now();

    let path = Path::new(file);
    if !path.exists() {
        anyhow::bail!("File not found: {}", file);
    }

    let app = build_pipeline::compile_spec(path)?;
    print_warnings(&app.warnings);

    if let Some(output) = output {
        let output_dir = Path::new(output);
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        let written = build_pipeline::write_units(&app, output_dir)?;
        eprintln!(
            "   {} {} unit(s) to {} in {:.2}s",
            "Compiled".green().bold(),
            written,
            output_dir.display(),
            start.elapsed().as_secs_f64()
        );
        return Ok(());
    }

    match unit {
        Some(wanted) => {
            let found = app.unit(wanted).with_context(|| {
                let known: Vec<_> = app.units.iter().map(|u| u.path.as_str()).collect();
                format!("No unit `{}` (available: {})", wanted, known.join(", "))
            })?;
            print!("{}", found.source);
        }
        None => print!("{}", app.listing()),
    }

    Ok(())
}
