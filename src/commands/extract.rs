use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::{self, Read};

use crate::compiler;
use crate::commands::print_warnings;
use crate::extract;

/// Clean raw completion text into a specification and print it as JSON
///
/// `input` is a file path, or `-` for stdin. With `check`, the extracted
/// specification is also compiled and any error is reported.
pub fn execute(input: &str, check: bool) -> Result<()> {
    let raw = if input == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read completion from stdin")?;
        raw
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };

    let json = extract::extract_json(&raw)?;
    let value: serde_json::Value =
        serde_json::from_str(&json).context("Extracted text is not valid JSON")?;

    if check {
        let spec = compiler::Specification::from_value(&value)?;
        let app = compiler::compile(&spec)?;
        print_warnings(&app.warnings);
        eprintln!(
            "   {} {} ({} page(s))",
            "Checked".green().bold(),
            spec.name,
            spec.pages.len()
        );
    }

    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}
