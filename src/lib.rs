//! # Site Assets Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom
//! - `file_manager`: Classificazione entry, copia file, utilità dimensioni
//! - `image_processor`: Ricompressione immagini (JPEG/PNG/WebP -> JPEG)
//! - `resize`: Calcolo dimensioni con limite sul lato lungo
//! - `optimizer`: Mirroring ricorsivo della directory sorgente
//! - `progress`: Progress bar e statistiche
//! - `json_output`: Eventi JSON per uso programmatico
//! - `relocate`: Spostamento degli asset statici in `public/`
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use site_assets::{Config, DirectoryMirror};
//!
//! let mirror = DirectoryMirror::new(Config::default())?;
//! let stats = mirror.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod json_output;
pub mod optimizer;
pub mod progress;
pub mod relocate;
pub mod resize;

pub use config::Config;
pub use error::CompressError;
pub use image_processor::{CompressionOutcome, ImageProcessor};
pub use optimizer::{DirectoryMirror, FileOutcome};
pub use progress::OptimizationStats;
pub use relocate::{relocate_static_files, RelocationReport};
