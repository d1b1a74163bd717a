use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Archive `source_dir` into a .zip at `zip_path`
///
/// Entries are sorted and stamped with a fixed time, so archiving the same tree
/// twice yields identical bytes. Returns the number of files written.
pub fn archive(source_dir: &Path, zip_path: &Path) -> Result<usize> {
    if let Some(parent) = zip_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let file = File::create(zip_path)
        .with_context(|| format!("Failed to create archive: {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut files = 0;
    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to walk {}", source_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .with_context(|| format!("{} is outside {}", entry.path().display(), source_dir.display()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), options.unix_permissions(0o755))
                .with_context(|| format!("Failed to add directory {}", name))?;
        } else {
            zip.start_file(name.clone(), options)
                .with_context(|| format!("Failed to add {}", name))?;
            let mut source = File::open(entry.path())
                .with_context(|| format!("Failed to open {}", entry.path().display()))?;
            io::copy(&mut source, &mut zip)
                .with_context(|| format!("Failed to compress {}", name))?;
            files += 1;
        }
    }

    let mut file = zip
        .finish()
        .with_context(|| format!("Failed to finish archive: {}", zip_path.display()))?;
    file.flush()?;

    Ok(files)
}
