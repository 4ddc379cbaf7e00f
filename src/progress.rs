//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche della run.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Gestisce la progress bar principale (`indicatif`)
//! - `OptimizationStats`: Traccia statistiche cumulative
//!
//! ## Statistiche tracciate:
//! - **files_compressed**: Immagini ricompresse
//! - **files_copied**: File copiati così come sono
//! - **files_skipped**: Entry saltate (link simbolici, file speciali)
//! - **errors**: File o directory che hanno fallito
//! - **directories_mirrored**: Directory ricreate nella destinazione
//! - **total_original_size** / **total_new_size**: Byte delle sole immagini
//!
//! Il risparmio netto può essere negativo: una ricompressione può ingrandire
//! un file già ottimizzato.
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:12] [=========>------------------------------] 37/150 (24%) a.png: 45.2% saved
//! ```

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Manages the progress bar of a run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// A progress manager that never draws (JSON mode, tests)
    pub fn hidden(total_files: u64) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

/// Statistics tracker for a mirror run
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
pub struct OptimizationStats {
    pub files_compressed: usize,
    pub files_copied: usize,
    pub files_skipped: usize,
    pub errors: usize,
    pub directories_mirrored: usize,
    pub total_original_size: u64,
    pub total_new_size: u64,
    pub total_copied_size: u64,
}

impl OptimizationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_compressed(&mut self, original_size: u64, new_size: u64) {
        self.files_compressed += 1;
        self.total_original_size += original_size;
        self.total_new_size += new_size;
    }

    pub fn add_copied(&mut self, size: u64) {
        self.files_copied += 1;
        self.total_copied_size += size;
    }

    pub fn add_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    pub fn add_directory(&mut self) {
        self.directories_mirrored += 1;
    }

    pub fn files_processed(&self) -> usize {
        self.files_compressed + self.files_copied + self.errors
    }

    /// Net bytes saved on images; negative if recompression grew them
    pub fn net_bytes_saved(&self) -> i64 {
        self.total_original_size as i64 - self.total_new_size as i64
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.total_original_size, self.total_new_size)
    }

    pub fn format_summary(&self) -> String {
        let saved = self.net_bytes_saved();
        let saved_text = if saved < 0 {
            format!("-{}", FileManager::format_size(saved.unsigned_abs()))
        } else {
            FileManager::format_size(saved as u64)
        };
        format!(
            "Processed: {} files | Compressed: {} | Copied: {} | Skipped: {} | Errors: {} | Total saved: {} ({:.2}%)",
            self.files_processed(),
            self.files_compressed,
            self.files_copied,
            self.files_skipped,
            self.errors,
            saved_text,
            self.overall_reduction_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate() {
        let mut stats = OptimizationStats::new();
        stats.add_compressed(1000, 400);
        stats.add_compressed(1000, 600);
        stats.add_copied(5);
        stats.add_error();
        stats.add_skipped();

        assert_eq!(stats.files_processed(), 4);
        assert_eq!(stats.net_bytes_saved(), 1000);
        assert_eq!(stats.overall_reduction_percent(), 50.0);
        assert!(stats.format_summary().contains("Errors: 1"));
    }

    #[test]
    fn test_negative_savings_are_reported() {
        let mut stats = OptimizationStats::new();
        stats.add_compressed(1024, 3072);

        assert_eq!(stats.net_bytes_saved(), -2048);
        assert!(stats.format_summary().contains("-2.00 KB"));
    }

    #[test]
    fn test_hidden_progress_counts() {
        let progress = ProgressManager::hidden(3);
        progress.update("one");
        progress.update("two");
        assert_eq!(progress.position(), 2);
        progress.finish("done");
    }
}
