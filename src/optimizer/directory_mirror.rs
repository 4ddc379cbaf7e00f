//! # Directory Mirror Orchestrator
//!
//! Orchestratore principale: visita in profondità (pre-order) la directory
//! sorgente, ricrea ogni directory nella destinazione e delega ogni file al
//! `TaskOptimizer`.
//!
//! ## Regole del traversal:
//! - Una directory viene creata (idempotente) e visitata per intero prima
//!   di passare ai fratelli successivi
//! - L'ordine dei fratelli è quello restituito da `read_dir`
//! - Link simbolici e file speciali non vengono seguiti né copiati
//! - Un errore su un file viene registrato e il traversal continua
//! - Un errore leggendo una directory abbandona solo quel sotto-albero
//! - Se la destinazione sta dentro la sorgente, la directory di
//!   destinazione non viene mai visitata
//!
//! Un file alla volta: ogni operazione viene attesa prima della successiva.

use crate::{
    config::Config,
    error::CompressError,
    file_manager::{EntryKind, FileManager},
    json_output::JsonMessage,
    optimizer::{
        path_resolver::PathResolver, progress_tracker::ProgressTracker,
        task_optimizer::TaskOptimizer,
    },
    progress::OptimizationStats,
};
use futures::future::{FutureExt, LocalBoxFuture};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info, warn};

/// Mirrors `source_root` into `dest_root`, recompressing images on the way
pub struct DirectoryMirror {
    config: Config,
    task_optimizer: TaskOptimizer,
}

impl DirectoryMirror {
    /// Crea nuova istanza; la configurazione viene validata qui
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let task_optimizer = TaskOptimizer::new(&config);
        Ok(Self {
            config,
            task_optimizer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Esegue il mirroring completo.
    ///
    /// Fails only when the source root is unusable, the destination root
    /// cannot be created, or both resolve to the same directory; in that case
    /// nothing is written. Per-file and
    /// per-directory failures are counted in the returned stats.
    pub async fn run(&self) -> Result<OptimizationStats, CompressError> {
        let start_time = Instant::now();
        let source_root = self.config.source_root.clone();
        let dest_root = self.config.dest_root.clone();

        Self::check_source(&source_root).await?;

        PathResolver::ensure_dir(&dest_root).await?;
        Self::check_distinct(&source_root, &dest_root).await?;
        let guard = Self::nested_destination(&source_root, &dest_root).await;
        if let Some(ref nested) = guard {
            warn!("Destination {} is inside the source tree and will not be traversed", nested.display());
        }

        let total_files = Self::count_files(&source_root, guard.clone()).await?;
        self.emit_start_message(total_files);

        let mut tracker = ProgressTracker::new(total_files, self.config.json_output);
        self.mirror_directory(&source_root, &dest_root, guard.as_deref(), &mut tracker)
            .await;

        let stats = tracker.finish();
        self.emit_complete_message(&stats, start_time.elapsed().as_secs_f64());
        Ok(stats)
    }

    /// La sorgente deve esistere ed essere una directory
    async fn check_source(source_root: &Path) -> Result<(), CompressError> {
        match fs::metadata(source_root).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(CompressError::NotADirectory(source_root.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CompressError::MissingSource(source_root.to_path_buf()))
            }
            Err(source) => Err(CompressError::ReadDir {
                path: source_root.to_path_buf(),
                source,
            }),
        }
    }

    /// Source and destination must not be the same directory, however spelled.
    ///
    /// Runs once the destination exists so both sides can be resolved;
    /// creating an already existing directory writes nothing.
    async fn check_distinct(source_root: &Path, dest_root: &Path) -> Result<(), CompressError> {
        let (Ok(source), Ok(dest)) = (
            fs::canonicalize(source_root).await,
            fs::canonicalize(dest_root).await,
        ) else {
            return Ok(());
        };

        if source == dest {
            return Err(CompressError::SameSourceAndDestination(dest));
        }
        Ok(())
    }

    /// File count for the progress bar, leaving out a nested destination
    async fn count_files(source_root: &Path, guard: Option<PathBuf>) -> Result<u64, CompressError> {
        // Walk the canonical root so walked paths compare equal to the guard
        let root = match guard {
            Some(_) => fs::canonicalize(source_root)
                .await
                .unwrap_or_else(|_| source_root.to_path_buf()),
            None => source_root.to_path_buf(),
        };
        let total = tokio::task::spawn_blocking(move || {
            FileManager::count_files(&root, guard.as_deref())
        })
        .await?;
        Ok(total)
    }

    /// Canonical destination root, only when it sits below the source root
    async fn nested_destination(source_root: &Path, dest_root: &Path) -> Option<PathBuf> {
        let source = fs::canonicalize(source_root).await.ok()?;
        let dest = fs::canonicalize(dest_root).await.ok()?;
        dest.starts_with(&source).then_some(dest)
    }

    async fn is_guarded(path: &Path, guard: Option<&Path>) -> bool {
        match guard {
            Some(guard) => fs::canonicalize(path)
                .await
                .map(|canonical| canonical == guard)
                .unwrap_or(false),
            None => false,
        }
    }

    /// Visita ricorsiva di una directory già creata nella destinazione
    fn mirror_directory<'a>(
        &'a self,
        source_dir: &'a Path,
        dest_dir: &'a Path,
        guard: Option<&'a Path>,
        tracker: &'a mut ProgressTracker,
    ) -> LocalBoxFuture<'a, ()> {
        async move {
            let mut entries = match fs::read_dir(source_dir).await {
                Ok(entries) => entries,
                Err(source) => {
                    let err = CompressError::ReadDir {
                        path: source_dir.to_path_buf(),
                        source,
                    };
                    tracker.record_directory_error(source_dir, &err.to_string());
                    return;
                }
            };

            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(source) => {
                        let err = CompressError::ReadDir {
                            path: source_dir.to_path_buf(),
                            source,
                        };
                        tracker.record_directory_error(source_dir, &err.to_string());
                        break;
                    }
                };

                let kind = match entry.file_type().await {
                    Ok(file_type) => EntryKind::from_file_type(file_type),
                    Err(e) => {
                        debug!("Cannot stat {}: {}", entry.path().display(), e);
                        EntryKind::Other
                    }
                };
                let node = PathResolver::node(entry.file_name(), kind, source_dir, dest_dir);

                if node.kind != EntryKind::Directory {
                    let outcome = self.task_optimizer.process_single_file(&node).await;
                    tracker.handle_file_completion(&node, &outcome);
                    continue;
                }

                if Self::is_guarded(&node.source_path, guard).await {
                    debug!("Skipping destination directory {}", node.source_path.display());
                    continue;
                }

                if let Err(e) = PathResolver::ensure_dir(&node.dest_path).await {
                    tracker.record_directory_error(&node.source_path, &e.to_string());
                    continue;
                }
                tracker.record_directory();

                self.mirror_directory(&node.source_path, &node.dest_path, guard, &mut *tracker)
                    .await;
            }
        }
        .boxed_local()
    }

    /// Invia messaggio di inizio
    fn emit_start_message(&self, total_files: u64) {
        if self.config.json_output {
            JsonMessage::start(&self.config, total_files).emit();
            return;
        }

        info!("🚀 Starting image compression...");
        info!("Source: {}", self.config.source_root.display());
        info!("Destination: {}", self.config.dest_root.display());
        info!(
            "Max edge: {}px | JPEG quality: {} | Files found: {}",
            self.config.max_width, self.config.quality, total_files
        );
        info!("----------------------------------------");
    }

    fn emit_complete_message(&self, stats: &OptimizationStats, duration_seconds: f64) {
        if self.config.json_output {
            JsonMessage::complete(stats, duration_seconds).emit();
            return;
        }

        info!("----------------------------------------");
        info!("🎉 All images have been processed!");
        info!("{}", stats.format_summary());
        info!(
            "Check '{}' for the optimized images ({:.1}s)",
            self.config.dest_root.display(),
            duration_seconds
        );
    }
}
