use std::fs;
use std::path::Path;

/// Failures confined to the export step; the console report printed
/// before the export attempt stays valid.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Writes the rendered report, overwriting any existing file.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        write_report(&path, "first\n").unwrap();
        write_report(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn missing_parent_dir_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("report.txt");
        let err = write_report(&path, "x").unwrap_err();
        assert!(err.to_string().contains("no-such-dir"));
    }
}
