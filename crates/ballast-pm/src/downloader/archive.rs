//! Zip extraction filtered through an ignore set.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{BallastError, Result};

use super::ignore::IgnoreSet;

/// Extracts zip archives, skipping entries the ignore set excludes.
pub struct ZipExtractor;

impl ZipExtractor {
    /// Extract `archive_path` into `dest_dir`.
    ///
    /// Entries are matched against `ignore` by their archive-relative path;
    /// excluded entries are skipped entirely (for directories this only
    /// skips the directory entry itself, contained files match on their own
    /// paths). Entries that would escape the destination fail the whole
    /// extraction.
    pub fn extract(archive_path: &Path, dest_dir: &Path, ignore: &IgnoreSet) -> Result<()> {
        let file = File::open(archive_path)?;
        let reader = BufReader::new(file);
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|e| BallastError::InstallationFailed(format!("Failed to open zip: {}", e)))?;

        std::fs::create_dir_all(dest_dir)?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| {
                BallastError::InstallationFailed(format!("Failed to read zip entry: {}", e))
            })?;

            let name = entry.name().trim_end_matches('/').to_string();
            if name.is_empty() {
                continue;
            }

            if ignore.is_excluded(&name) {
                log::trace!("Ignoring archive entry {}", name);
                continue;
            }

            // Reject entries that resolve outside the destination.
            let relative = entry.enclosed_name().ok_or_else(|| {
                BallastError::InstallationFailed(format!(
                    "Path traversal detected in archive: {}",
                    entry.name()
                ))
            })?;
            let outpath = dest_dir.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&outpath)?;
                continue;
            }

            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut entry, &mut outfile)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn fixture_zip(dir: &Path, entries: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join("fixture.zip");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_extracts_all_entries() {
        let temp = TempDir::new().unwrap();
        let archive = fixture_zip(temp.path(), &[("a.txt", "a"), ("sub/b.txt", "b")]);
        let dest = temp.path().join("out");

        let ignore = IgnoreSet::from_rules(&[]).unwrap();
        ZipExtractor::extract(&archive, &dest, &ignore).unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("a.txt")).unwrap(), "a");
        assert_eq!(std::fs::read_to_string(dest.join("sub/b.txt")).unwrap(), "b");
    }

    #[test]
    fn test_skips_ignored_entries() {
        let temp = TempDir::new().unwrap();
        let archive = fixture_zip(
            temp.path(),
            &[("keep.txt", "k"), ("docs/a.md", "a"), ("docs/b.md", "b")],
        );
        let dest = temp.path().join("out");

        let rules = vec!["docs/*".to_string(), "!docs/b.md".to_string()];
        let ignore = IgnoreSet::from_rules(&rules).unwrap();
        ZipExtractor::extract(&archive, &dest, &ignore).unwrap();

        assert!(dest.join("keep.txt").exists());
        assert!(!dest.join("docs/a.md").exists());
        assert!(dest.join("docs/b.md").exists());
    }

    #[test]
    fn test_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let archive = fixture_zip(temp.path(), &[("../escape.txt", "x")]);
        let dest = temp.path().join("out");

        let ignore = IgnoreSet::from_rules(&[]).unwrap();
        let err = ZipExtractor::extract(&archive, &dest, &ignore).unwrap_err();
        assert!(err.to_string().contains("Path traversal"));
        assert!(!temp.path().join("escape.txt").exists());
    }
}
