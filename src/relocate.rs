//! # Static File Relocation Module
//!
//! Spostamento una tantum degli asset del sito dentro la directory `public`.
//!
//! ## Comportamento:
//! - Crea `public/` se non esiste (idempotente)
//! - Per ogni voce di `STATIC_ITEMS`, nell'ordine: se esiste viene spostata
//!   con `rename`, altrimenti viene saltata con il motivo
//! - Un singolo spostamento fallito non interrompe gli altri
//!
//! ## Esempio:
//! ```rust,ignore
//! let report = relocate_static_files(Path::new("."), "public").await?;
//! println!("{} moved, {} skipped", report.moved.len(), report.skipped.len());
//! ```

use crate::error::CompressError;
use crate::optimizer::path_resolver::PathResolver;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Top-level items moved into the public directory
pub const STATIC_ITEMS: &[&str] = &["css", "js", "images", "products", "index.html"];

/// Default name of the public directory
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// An item moved into the public directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedItem {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// An item left where it was
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RelocationReport {
    pub moved: Vec<MovedItem>,
    pub skipped: Vec<SkippedItem>,
}

/// Move every entry of [`STATIC_ITEMS`] found in `root` into `root/<public_dir>`.
///
/// Only failing to create the public directory is an error.
pub async fn relocate_static_files(
    root: &Path,
    public_dir: &str,
) -> Result<RelocationReport, CompressError> {
    let public = root.join(public_dir);
    PathResolver::ensure_dir(&public).await?;

    let mut report = RelocationReport::default();
    for item in STATIC_ITEMS {
        let from = root.join(item);
        let to = public.join(item);

        match move_item(&from, &to).await {
            Ok(()) => {
                info!("Moved: {} → {}", from.display(), to.display());
                report.moved.push(MovedItem { from, to });
            }
            Err(reason) => {
                info!("Skipping {}: {}", item, reason);
                report.skipped.push(SkippedItem {
                    name: item.to_string(),
                    reason,
                });
            }
        }
    }

    info!(
        "✅ {} item(s) moved to {}, {} skipped",
        report.moved.len(),
        public.display(),
        report.skipped.len()
    );
    Ok(report)
}

async fn move_item(from: &Path, to: &Path) -> Result<(), String> {
    fs::symlink_metadata(from)
        .await
        .map_err(|e| format!("{} ({})", e, from.display()))?;

    PathResolver::ensure_parent_dirs(to)
        .await
        .map_err(|e| e.to_string())?;

    debug!("Renaming {} -> {}", from.display(), to.display());
    fs::rename(from, to)
        .await
        .map_err(|e| format!("{} ({} -> {})", e, from.display(), to.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_moves_present_items_and_skips_missing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("css")).unwrap();
        std::fs::write(root.join("css/site.css"), "body{}").unwrap();
        std::fs::create_dir_all(root.join("images")).unwrap();
        std::fs::write(root.join("index.html"), "<html></html>").unwrap();
        std::fs::write(root.join("server.js"), "// stays").unwrap();

        let report = relocate_static_files(root, DEFAULT_PUBLIC_DIR).await.unwrap();

        let moved: Vec<_> = report
            .moved
            .iter()
            .map(|m| m.to.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            moved,
            vec![
                PathBuf::from("public/css"),
                PathBuf::from("public/images"),
                PathBuf::from("public/index.html"),
            ]
        );
        let skipped: Vec<_> = report.skipped.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skipped, vec!["js", "products"]);

        assert_eq!(std::fs::read_to_string(root.join("public/css/site.css")).unwrap(), "body{}");
        assert!(!root.join("css").exists());
        assert!(root.join("server.js").exists());
    }

    #[tokio::test]
    async fn test_second_run_skips_everything() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("js")).unwrap();

        relocate_static_files(tmp.path(), "public").await.unwrap();
        let report = relocate_static_files(tmp.path(), "public").await.unwrap();

        assert!(report.moved.is_empty());
        assert_eq!(report.skipped.len(), STATIC_ITEMS.len());
        assert!(tmp.path().join("public/js").is_dir());
    }

    #[tokio::test]
    async fn test_existing_target_does_not_abort_the_rest() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("css")).unwrap();
        std::fs::create_dir_all(root.join("public/css/keep")).unwrap();
        std::fs::create_dir_all(root.join("products")).unwrap();

        let report = relocate_static_files(root, "public").await.unwrap();

        assert!(report.skipped.iter().any(|s| s.name == "css"));
        assert!(report.moved.iter().any(|m| m.to == root.join("public/products")));
    }

    #[tokio::test]
    async fn test_public_dir_blocked_by_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("public"), "not a dir").unwrap();

        assert!(relocate_static_files(tmp.path(), "public").await.is_err());
    }
}
