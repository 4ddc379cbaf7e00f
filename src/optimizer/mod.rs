//! # Optimizer Module
//!
//! Modulo che separa le responsabilità del mirroring in sottomoduli:
//! - `directory_mirror`: Orchestratore principale (traversal ricorsivo)
//! - `task_optimizer`: Worker per singoli file
//! - `progress_tracker`: Gestione progress e report unificata
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod directory_mirror;
pub mod path_resolver;
pub mod progress_tracker;
pub mod task_optimizer;

pub use directory_mirror::DirectoryMirror;
pub use path_resolver::{PathResolver, TraversalNode};
pub use progress_tracker::ProgressTracker;
pub use task_optimizer::{FileOutcome, TaskOptimizer};
