//! Persisting generated units

use crate::diagnostics::DiagnosticSink;
use crate::error::GenerateError;
use crate::generator::GeneratedUnit;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write every unit to `<dir>/<file_name>`, replacing existing files.
///
/// `dir` must exist. The first I/O failure aborts; files written before it
/// stay in place. Returns the written paths in unit order.
pub fn write_units(
    dir: &Path,
    units: &[GeneratedUnit],
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<PathBuf>, GenerateError> {
    if !dir.is_dir() {
        return Err(GenerateError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "output directory does not exist",
            ),
        });
    }

    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = dir.join(&unit.file_name);
        write_file(&path, unit.contents.as_bytes()).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        sink.info(
            &path.display().to_string(),
            format!("wrote {} ({} bytes)", unit.class_name, unit.contents.len()),
        );
        written.push(path);
    }
    Ok(written)
}

fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.flush()
}
