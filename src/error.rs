//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom della libreria.
//!
//! ## Responsabilità:
//! - Definisce `CompressError` enum per categorizzare gli errori del mirroring
//! - Mantiene sempre il path coinvolto nel messaggio, così ogni riga di log
//!   identifica il file o la directory che ha causato il problema
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `MissingSource` / `NotADirectory`: la root sorgente non è utilizzabile
//! - `SameSourceAndDestination`: la destinazione risolve alla sorgente stessa
//! - `ReadDir` / `CreateDir`: errori di traversal su una singola directory
//! - `Read` / `Write` / `Copy`: errori di I/O su un singolo file
//! - `Decode` / `Encode`: errori del codec immagine
//! - `Task`: il task bloccante di encoding è andato in panic
//!
//! Gli errori per-file non risalgono mai oltre `TaskOptimizer`: vengono
//! convertiti in `FileOutcome::Failed` e loggati.

use std::path::PathBuf;

/// Errors raised while mirroring and compressing a directory tree
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("Source directory does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Source path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Source and destination resolve to the same directory: {}", .0.display())]
    SameSourceAndDestination(PathBuf),

    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} -> {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
