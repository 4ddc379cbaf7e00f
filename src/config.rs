//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione del mirroring con compressione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri della run
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default (gli stessi degli script originali del sito)
//!
//! ## Parametri di configurazione:
//! - `source_root`: Directory sorgente (default: `images`)
//! - `dest_root`: Directory di destinazione (default: `compressed_images`)
//! - `max_width`: Limite in pixel del lato lungo (default: 1200)
//! - `quality`: Qualità JPEG (1-100, default: 80)
//! - `json_output`: Eventi JSON su stdout invece dei log (default: false)
//!
//! La configurazione viene costruita una sola volta in `main` e passata per
//! valore a `DirectoryMirror::new`: nessuno stato globale.
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     max_width: 1600,
//!     quality: 85,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default long-edge bound in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 1200;
/// Default JPEG quality
pub const DEFAULT_QUALITY: u8 = 80;

/// Configuration for a mirror-and-compress run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory tree to read from
    pub source_root: PathBuf,
    /// Directory tree to write the mirror into
    pub dest_root: PathBuf,
    /// Neither output dimension may exceed this many pixels
    pub max_width: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("images"),
            dest_root: PathBuf::from("compressed_images"),
            max_width: DEFAULT_MAX_WIDTH,
            quality: DEFAULT_QUALITY,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(anyhow::anyhow!("Max width must be greater than 0"));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(anyhow::anyhow!("JPEG quality must be between 1 and 100"));
        }

        if self.source_root == self.dest_root {
            return Err(anyhow::anyhow!(
                "Source and destination must differ: {}",
                self.source_root.display()
            ));
        }

        Ok(())
    }

    /// Load configuration from file.
    ///
    /// Not validated here: CLI overrides still apply on top, and
    /// `DirectoryMirror::new` validates the merged value.
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
