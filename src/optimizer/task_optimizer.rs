//! # Task Optimizer Module
//!
//! Worker per l'elaborazione di un singolo file del mirror.
//! Separato dal walker per maggiore modularità: qui un file diventa sempre
//! un `FileOutcome`, qualunque cosa succeda, così un errore non interrompe
//! mai il traversal.

use crate::{
    config::Config,
    error::CompressError,
    file_manager::{EntryKind, FileManager},
    image_processor::{CompressionOutcome, ImageProcessor},
    optimizer::path_resolver::TraversalNode,
};
use tracing::debug;

/// What happened to one file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Recognised image, recompressed into the destination
    Compressed(CompressionOutcome),
    /// Any other regular file, copied unchanged
    Copied { size: u64 },
    /// Links and special files are left out of the mirror
    Skipped { reason: String },
    /// Processing failed; the destination entry may be missing
    Failed { message: String },
}

impl FileOutcome {
    pub fn failed(error: &CompressError) -> Self {
        Self::Failed {
            message: error.to_string(),
        }
    }
}

/// Worker per elaborazione singoli file
pub struct TaskOptimizer {
    image_processor: ImageProcessor,
}

impl TaskOptimizer {
    pub fn new(config: &Config) -> Self {
        Self {
            image_processor: ImageProcessor::new(config),
        }
    }

    /// Processa un singolo file: ricompressione, copia o skip
    pub async fn process_single_file(&self, node: &TraversalNode) -> FileOutcome {
        // Directories never get here: the walker recurses into them itself
        if node.kind != EntryKind::File {
            return FileOutcome::Skipped {
                reason: node.kind.describe().to_string(),
            };
        }

        let result = if FileManager::is_image(&node.source_path) {
            debug!("Processing as image: {}", node.source_path.display());
            self.image_processor
                .compress(&node.source_path, &node.dest_path)
                .await
                .map(FileOutcome::Compressed)
        } else {
            debug!("Copying as-is: {}", node.source_path.display());
            FileManager::copy_file(&node.source_path, &node.dest_path)
                .await
                .map(|size| FileOutcome::Copied { size })
        };

        result.unwrap_or_else(|e| FileOutcome::failed(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_processor::tests::write_test_image;
    use crate::optimizer::path_resolver::PathResolver;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TaskOptimizer) {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        std::fs::create_dir_all(tmp.path().join("dst")).unwrap();
        let config = Config {
            max_width: 100,
            quality: 80,
            ..Default::default()
        };
        (tmp, TaskOptimizer::new(&config))
    }

    fn node(tmp: &TempDir, name: &str, kind: EntryKind) -> TraversalNode {
        PathResolver::node(
            OsString::from(name),
            kind,
            &tmp.path().join("src"),
            &tmp.path().join("dst"),
        )
    }

    #[tokio::test]
    async fn test_text_file_is_copied_verbatim() {
        let (tmp, worker) = setup();
        std::fs::write(tmp.path().join("src/b.txt"), "hello").unwrap();

        let outcome = worker.process_single_file(&node(&tmp, "b.txt", EntryKind::File)).await;

        assert_eq!(outcome, FileOutcome::Copied { size: 5 });
        assert_eq!(std::fs::read(tmp.path().join("dst/b.txt")).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_uppercase_extension_is_compressed() {
        let (tmp, worker) = setup();
        write_test_image(&tmp.path().join("src/photo.png"), 400, 200);
        std::fs::rename(tmp.path().join("src/photo.png"), tmp.path().join("src/PHOTO.PNG")).unwrap();

        let outcome = worker.process_single_file(&node(&tmp, "PHOTO.PNG", EntryKind::File)).await;

        match outcome {
            FileOutcome::Compressed(c) => assert_eq!(c.new_dimensions.width, 100),
            other => panic!("expected compression, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failure_becomes_outcome() {
        let (tmp, worker) = setup();
        std::fs::write(tmp.path().join("src/bad.webp"), "garbage").unwrap();

        let outcome = worker.process_single_file(&node(&tmp, "bad.webp", EntryKind::File)).await;

        match outcome {
            FileOutcome::Failed { message } => assert!(message.contains("bad.webp")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_other_entries_are_skipped() {
        let (tmp, worker) = setup();
        let outcome = worker.process_single_file(&node(&tmp, "link", EntryKind::Other)).await;
        assert!(matches!(outcome, FileOutcome::Skipped { .. }));
        assert!(!tmp.path().join("dst/link").exists());
    }
}
