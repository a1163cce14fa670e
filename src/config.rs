use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Language hint handed to the text recognizer.
pub const DEFAULT_LANGUAGE: &str = "spa";

pub const DEFAULT_RECOGNIZER: &str = "tesseract";

/// Days ahead of an expiry date at which a `proximo` alert is raised.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

pub const MIN_PASSWORD_LEN: usize = 4;

pub fn project_dirs() -> anyhow::Result<ProjectDirs> {
    ProjectDirs::from("co", "provedocs", "provedocs")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

pub fn export_dir() -> anyhow::Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.to_path_buf())
}

/// Bare file names land in the export directory; anything with a directory
/// component is used as given.
pub fn resolve_output(path: &str) -> anyhow::Result<PathBuf> {
    let p = Path::new(path);
    if p.components().count() > 1 || p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    Ok(export_dir()?.join(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_output_keeps_explicit_paths() {
        let resolved = resolve_output("/tmp/reporte.csv").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/reporte.csv"));

        let relative = resolve_output("out/reporte.csv").unwrap();
        assert_eq!(relative, PathBuf::from("out/reporte.csv"));
    }
}
