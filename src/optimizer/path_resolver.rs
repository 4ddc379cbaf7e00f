//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path sorgente/destinazione durante il
//! traversal: ogni entry letta da una directory diventa un `TraversalNode`
//! con il nome unito alle due directory correnti.

use crate::error::CompressError;
use crate::file_manager::EntryKind;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One directory entry, resolved against both trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalNode {
    pub name: OsString,
    pub kind: EntryKind,
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
}

impl TraversalNode {
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Resolve an entry named `name` inside `source_dir` to its mirror inside `dest_dir`
    pub fn node(name: OsString, kind: EntryKind, source_dir: &Path, dest_dir: &Path) -> TraversalNode {
        let source_path = source_dir.join(&name);
        let dest_path = dest_dir.join(&name);
        debug!("Resolved {} -> {}", source_path.display(), dest_path.display());
        TraversalNode {
            name,
            kind,
            source_path,
            dest_path,
        }
    }

    /// Crea le directory parent se necessario
    pub async fn ensure_parent_dirs(path: &Path) -> Result<(), CompressError> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent).await?;
        }
        Ok(())
    }

    /// Crea una directory (e i suoi parent); già esistente non è un errore
    pub async fn ensure_dir(path: &Path) -> Result<(), CompressError> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|source| CompressError::CreateDir {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_node_joins_both_roots() {
        let node = PathResolver::node(
            OsString::from("c.jpg"),
            EntryKind::File,
            Path::new("/site/images/sub"),
            Path::new("/site/compressed_images/sub"),
        );
        assert_eq!(node.source_path, PathBuf::from("/site/images/sub/c.jpg"));
        assert_eq!(node.dest_path, PathBuf::from("/site/compressed_images/sub/c.jpg"));
        assert_eq!(node.display_name(), "c.jpg");
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");
        PathResolver::ensure_dir(&dir).await.unwrap();
        PathResolver::ensure_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_dir_over_a_file_fails() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("taken");
        std::fs::write(&file, "x").unwrap();

        let err = PathResolver::ensure_dir(&file).await.unwrap_err();
        assert!(matches!(err, CompressError::CreateDir { .. }));
    }
}
