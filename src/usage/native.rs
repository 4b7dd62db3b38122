//! Backend that walks the tree in-process and reports what `du -k -d 1` would.

use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DuimError, Result};

use super::entry::{DirectorySize, UsageReport};
use super::UsageSource;

/// Allocated size on disk. st_blocks is in 512-byte units on Linux and the BSDs.
pub fn allocated_bytes(metadata: &Metadata) -> u64 {
    metadata.blocks() * 512
}

fn to_blocks(bytes: u64) -> u64 {
    bytes.div_ceil(1024)
}

/// In-process one-level scan.
///
/// Reports allocated size (not apparent size) for every immediate
/// subdirectory in file-name order, then the target itself. Symlinks are not
/// followed and hard-linked files are counted once.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeScan;

impl NativeScan {
    pub fn new() -> Self {
        Self
    }
}

impl UsageSource for NativeScan {
    fn collect(&self, target: &Path) -> Result<UsageReport> {
        let io_error = |path: &Path, source: std::io::Error| DuimError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Err(err) = fs::symlink_metadata(target) {
            if err.kind() == ErrorKind::PermissionDenied {
                tracing::debug!(path = %target.display(), "Permission denied on scan target");
                return Ok(UsageReport::permission_denied());
            }
            return Err(io_error(target, err));
        }

        let mut children: Vec<(PathBuf, u64)> = Vec::new();
        let mut current: Option<usize> = None;
        let mut total = 0u64;
        let mut seen_links: HashSet<(u64, u64)> = HashSet::new();
        let mut denied = false;

        for result in WalkDir::new(target).sort_by_file_name() {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().unwrap_or(target).to_path_buf();
                    match err.into_io_error() {
                        Some(io) if io.kind() == ErrorKind::PermissionDenied => {
                            tracing::debug!(path = %path.display(), "Permission denied");
                            denied = true;
                            continue;
                        }
                        Some(io) => return Err(io_error(&path, io)),
                        None => {
                            // walkdir only yields non-io errors for symlink loops,
                            // which cannot happen without following links
                            tracing::debug!(path = %path.display(), "Skipping unreadable entry");
                            continue;
                        }
                    }
                }
            };

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    let path = entry.path().to_path_buf();
                    match err.into_io_error() {
                        Some(io) if io.kind() == ErrorKind::PermissionDenied => {
                            denied = true;
                            continue;
                        }
                        Some(io) => return Err(io_error(&path, io)),
                        None => continue,
                    }
                }
            };

            if entry.depth() == 1 {
                current = if metadata.is_dir() {
                    children.push((entry.path().to_path_buf(), 0));
                    Some(children.len() - 1)
                } else {
                    None
                };
            }

            if !metadata.is_dir()
                && metadata.nlink() > 1
                && !seen_links.insert((metadata.dev(), metadata.ino()))
            {
                continue;
            }

            let bytes = allocated_bytes(&metadata);
            total += bytes;
            if let Some(idx) = current {
                children[idx].1 += bytes;
            }
        }

        if denied {
            tracing::debug!(
                path = %target.display(),
                "Permission errors during scan, discarding partial results"
            );
            return Ok(UsageReport::permission_denied());
        }

        let mut entries: Vec<DirectorySize> = children
            .into_iter()
            .map(|(path, bytes)| DirectorySize::new(path.display().to_string(), to_blocks(bytes)))
            .collect();
        entries.push(DirectorySize::new(
            target.display().to_string(),
            to_blocks(total),
        ));

        tracing::debug!(count = entries.len(), "Native scan complete");
        Ok(UsageReport::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_file(path: &Path, len: usize) {
        File::create(path).unwrap().write_all(&vec![b'x'; len]).unwrap();
    }

    #[test]
    fn test_to_blocks_rounds_up() {
        assert_eq!(to_blocks(0), 0);
        assert_eq!(to_blocks(1), 1);
        assert_eq!(to_blocks(1024), 1);
        assert_eq!(to_blocks(1025), 2);
    }

    #[test]
    fn test_lists_subdirectories_then_target() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("beta/nested")).unwrap();
        fs::create_dir(root.join("alpha")).unwrap();
        write_file(&root.join("beta/nested/data.bin"), 64 * 1024);
        write_file(&root.join("top.txt"), 10);

        let report = NativeScan::new().collect(root).unwrap();
        let paths: Vec<_> = report.entries.iter().map(|e| e.path.clone()).collect();

        assert_eq!(
            paths,
            [
                root.join("alpha").display().to_string(),
                root.join("beta").display().to_string(),
                root.display().to_string(),
            ]
        );
        assert!(!report.permission_denied);
    }

    #[test]
    fn test_target_includes_children() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("big")).unwrap();
        write_file(&root.join("big/blob.bin"), 256 * 1024);

        let report = NativeScan::new().collect(root).unwrap();
        let big = &report.entries[0];
        let target = report.entries.last().unwrap();

        // Allocation varies by filesystem (compression, tail packing)
        assert!(big.blocks > 0);
        assert!(target.blocks >= big.blocks);
    }

    #[test]
    fn test_files_are_not_listed() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("only-file"), 100);

        let report = NativeScan::new().collect(dir.path()).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].path, dir.path().display().to_string());
    }

    #[test]
    fn test_hard_links_counted_once() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("links")).unwrap();
        write_file(&root.join("links/original"), 128 * 1024);

        let single = NativeScan::new().collect(root).unwrap().entries[0].blocks;
        fs::hard_link(root.join("links/original"), root.join("links/copy")).unwrap();
        let linked = NativeScan::new().collect(root).unwrap().entries[0].blocks;

        assert_eq!(single, linked);
    }

    #[test]
    fn test_unreadable_subdirectory_is_permission_denied() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("open")).unwrap();
        fs::create_dir(root.join("locked")).unwrap();
        write_file(&root.join("locked/secret"), 10);
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions
        if fs::read_dir(root.join("locked")).is_ok() {
            fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = NativeScan::new().collect(root);
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

        let report = report.unwrap();
        assert!(report.permission_denied);
        assert!(report.is_empty());
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_missing_target_is_io_error() {
        let err = NativeScan::new()
            .collect(Path::new("/nonexistent/duim/target"))
            .unwrap_err();
        assert!(matches!(err, DuimError::Io { .. }));
    }
}
