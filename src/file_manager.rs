//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file usate dal mirroring.
//!
//! ## Responsabilità:
//! - Classificazione delle entry di directory (directory, file, altro)
//! - Determinazione formato file (immagine riconosciuta vs file generico)
//! - Copia byte-per-byte dei file non immagine
//! - Conteggio preliminare dei file per la progress bar
//! - Utilità per calcoli dimensioni e percentuali
//!
//! ## Formati immagine riconosciuti:
//! - JPG, JPEG, PNG, WebP (estensione case-insensitive)
//!
//! ## Link simbolici:
//! Non vengono mai seguiti: né dal conteggio né dalla classificazione.
//! Una entry che non è directory né file regolare è `EntryKind::Other`.
//!
//! ## Esempio:
//! ```rust,ignore
//! if FileManager::is_image(&path) {
//!     // recompress
//! } else {
//!     FileManager::copy_file(&path, &target).await?;
//! }
//! ```

use crate::error::CompressError;
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Extensions handled by the image recompression step
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// What a directory entry is, without following links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symbolic link, socket, device, fifo...
    Other,
}

impl EntryKind {
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Other
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
            Self::Other => "not a regular file or directory",
        }
    }
}

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Check if a file is an image we recompress
    pub fn is_image(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        } else {
            false
        }
    }

    /// Size in bytes of a file
    pub async fn get_file_size(path: &Path) -> Result<u64, CompressError> {
        let metadata = fs::metadata(path).await.map_err(|source| CompressError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(metadata.len())
    }

    /// Copy a file byte-for-byte, returning the number of bytes written
    pub async fn copy_file(from: &Path, to: &Path) -> Result<u64, CompressError> {
        fs::copy(from, to).await.map_err(|source| CompressError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    }

    /// Count regular files below `root` without following links.
    ///
    /// Used only to size the progress bar; unreadable entries are ignored.
    /// The `exclude` directory, compared by path as walked, is not descended.
    pub fn count_files(root: &Path, exclude: Option<&Path>) -> u64 {
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| Some(e.path()) != exclude)
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .count() as u64
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction (negative when the file grew)
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_image_case_insensitive() {
        assert!(FileManager::is_image(Path::new("a.jpg")));
        assert!(FileManager::is_image(Path::new("a.JPEG")));
        assert!(FileManager::is_image(Path::new("dir/b.Png")));
        assert!(FileManager::is_image(Path::new("c.webp")));
        assert!(!FileManager::is_image(Path::new("d.gif")));
        assert!(!FileManager::is_image(Path::new("e.txt")));
        assert!(!FileManager::is_image(Path::new("jpg")));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(FileManager::calculate_reduction(0, 10), 0.0);
        assert_eq!(FileManager::calculate_reduction(200, 50), 75.0);
        assert_eq!(FileManager::calculate_reduction(100, 150), -50.0);
    }

    #[test]
    fn test_count_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        std::fs::write(tmp.path().join("one.txt"), "1").unwrap();
        std::fs::write(tmp.path().join("a/two.txt"), "2").unwrap();
        std::fs::write(tmp.path().join("a/b/three.txt"), "3").unwrap();

        assert_eq!(FileManager::count_files(tmp.path(), None), 3);
        assert_eq!(FileManager::count_files(tmp.path(), Some(&tmp.path().join("a"))), 1);
    }

    #[tokio::test]
    async fn test_copy_file_reports_path_on_failure() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.txt");
        let err = FileManager::copy_file(&missing, &tmp.path().join("out.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
