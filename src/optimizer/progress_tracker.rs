//! # Progress Tracking Module
//!
//! Unifica progress bar, statistiche e report per-file in un singolo tracker.
//! Gestisce sia output JSON che log tradizionali: una riga per file, con
//! glifo di esito.

use crate::{
    json_output::JsonMessage,
    optimizer::{path_resolver::TraversalNode, task_optimizer::FileOutcome},
    progress::{OptimizationStats, ProgressManager},
};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Tracker di una run: raccoglie gli esiti e li riporta
pub struct ProgressTracker {
    json_output: bool,
    stats: OptimizationStats,
    progress_manager: ProgressManager,
}

impl ProgressTracker {
    /// Crea un nuovo tracker
    pub fn new(total_files: u64, json_output: bool) -> Self {
        let progress_manager = if json_output {
            ProgressManager::hidden(total_files)
        } else {
            ProgressManager::new(total_files)
        };
        Self::with_manager(json_output, progress_manager)
    }

    pub fn with_manager(json_output: bool, progress_manager: ProgressManager) -> Self {
        Self {
            json_output,
            stats: OptimizationStats::new(),
            progress_manager,
        }
    }

    pub fn record_directory(&mut self) {
        self.stats.add_directory();
    }

    /// Directory that could not be read or created: its subtree is abandoned
    pub fn record_directory_error(&mut self, path: &Path, message: &str) {
        self.stats.add_error();
        if self.json_output {
            JsonMessage::error(message.to_string(), Some(path.to_path_buf())).emit();
        }
        error!("❌ Error processing directory {}: {}", path.display(), message);
    }

    /// Registra l'esito di un file, aggiorna la barra ed emette log/JSON
    pub fn handle_file_completion(&mut self, node: &TraversalNode, outcome: &FileOutcome) {
        let name = node.display_name();

        let bar_message = match outcome {
            FileOutcome::Compressed(c) => {
                self.stats.add_compressed(c.original_size, c.new_size);
                if !self.json_output {
                    info!(
                        "✅ Compressed: {} - Saved: {:.2}KB ({:.2}%)",
                        name,
                        c.saved_bytes() as f64 / 1024.0,
                        c.saved_percent()
                    );
                    if c.was_resized() {
                        debug!("   resized {} -> {}", c.original_dimensions, c.new_dimensions);
                    }
                }
                format!("[OK] {}: {:.1}% saved", name, c.saved_percent())
            }
            FileOutcome::Copied { size } => {
                self.stats.add_copied(*size);
                if !self.json_output {
                    info!("📄 Copied: {} (not an image)", name);
                }
                format!("[COPY] {}", name)
            }
            FileOutcome::Skipped { reason } => {
                self.stats.add_skipped();
                warn!("⏭️ Skipped: {} ({})", node.source_path.display(), reason);
                format!("[SKIP] {}", name)
            }
            FileOutcome::Failed { message } => {
                self.stats.add_error();
                error!("❌ Error processing {}: {}", node.source_path.display(), message);
                format!("[ERROR] {}", name)
            }
        };

        if self.json_output {
            JsonMessage::file_complete(node.source_path.clone(), outcome).emit();
        }

        if !matches!(outcome, FileOutcome::Skipped { .. }) {
            self.progress_manager.update(&bar_message);
        }
    }

    /// Finalizza la progress bar e restituisce le statistiche
    pub fn finish(self) -> OptimizationStats {
        self.progress_manager.finish(&self.stats.format_summary());
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_manager::EntryKind;
    use crate::optimizer::path_resolver::PathResolver;
    use std::ffi::OsString;

    fn node(name: &str) -> TraversalNode {
        PathResolver::node(OsString::from(name), EntryKind::File, Path::new("src"), Path::new("dst"))
    }

    #[test]
    fn test_outcomes_feed_stats() {
        let mut tracker = ProgressTracker::with_manager(false, ProgressManager::hidden(3));

        tracker.handle_file_completion(&node("b.txt"), &FileOutcome::Copied { size: 5 });
        tracker.handle_file_completion(
            &node("bad.jpg"),
            &FileOutcome::Failed {
                message: "decode".to_string(),
            },
        );
        tracker.handle_file_completion(
            &node("link"),
            &FileOutcome::Skipped {
                reason: "symlink".to_string(),
            },
        );
        tracker.record_directory();

        let stats = tracker.finish();
        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.directories_mirrored, 1);
    }
}
