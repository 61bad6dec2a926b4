//! File size probe for the file totals section of the report.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A resource listed in the report (e.g. a loaded source file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Read the size of each path from the filesystem
///
/// **Public** - used by the CLI to feed `SummaryInputs::files`
///
/// Paths that cannot be read are kept with size 0 so the file count
/// still matches what the caller asked for.
pub fn collect_file_info<P: AsRef<Path>>(paths: &[P]) -> Vec<FileInfo> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let size = match std::fs::metadata(path) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    warn!("Cannot read size of {}: {}", path.display(), e);
                    0
                }
            };
            debug!("File {} is {} bytes", path.display(), size);
            FileInfo::new(path.display().to_string(), size)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_collect_file_info() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 1500]).unwrap();
        file.flush().unwrap();

        let files = collect_file_info(&[file.path()]);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 1500);
    }

    #[test]
    fn test_missing_file_has_zero_size() {
        let files = collect_file_info(&["/definitely/not/here.rs"]);
        assert_eq!(files, vec![FileInfo::new("/definitely/not/here.rs", 0)]);
    }
}
