//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON (`--json`) per chi
//! vuole consumare la run da un altro processo.
//!
//! ## Tipi di messaggi (uno per riga su stdout):
//! - `start`: Inizio della run con configurazione effettiva
//! - `file_complete`: Esito di un singolo file
//! - `complete`: Fine della run con statistiche finali
//! - `error`: Errore che riguarda la run intera o una directory

use crate::config::Config;
use crate::optimizer::task_optimizer::FileOutcome;
use crate::progress::OptimizationStats;
use crate::resize::Dimensions;
use serde::Serialize;
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio della run
    #[serde(rename = "start")]
    Start {
        source_root: PathBuf,
        dest_root: PathBuf,
        total_files: u64,
        max_width: u32,
        quality: u8,
    },

    /// Fine elaborazione di un file specifico
    #[serde(rename = "file_complete")]
    FileComplete {
        path: PathBuf,
        outcome: &'static str,
        original_size: Option<u64>,
        new_size: Option<u64>,
        saved_percent: Option<f64>,
        dimensions: Option<Dimensions>,
        error: Option<String>,
    },

    /// Run completata
    #[serde(rename = "complete")]
    Complete {
        stats: OptimizationStats,
        duration_seconds: f64,
    },

    /// Errore generale
    #[serde(rename = "error")]
    Error {
        message: String,
        path: Option<PathBuf>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(config: &Config, total_files: u64) -> Self {
        Self::Start {
            source_root: config.source_root.clone(),
            dest_root: config.dest_root.clone(),
            total_files,
            max_width: config.max_width,
            quality: config.quality,
        }
    }

    /// Crea un messaggio di completamento file
    pub fn file_complete(path: PathBuf, outcome: &FileOutcome) -> Self {
        let (label, original_size, new_size, saved_percent, dimensions, error) = match outcome {
            FileOutcome::Compressed(c) => (
                "compressed",
                Some(c.original_size),
                Some(c.new_size),
                Some(c.saved_percent()),
                Some(c.new_dimensions),
                None,
            ),
            FileOutcome::Copied { size } => ("copied", Some(*size), Some(*size), None, None, None),
            FileOutcome::Skipped { reason } => {
                ("skipped", None, None, None, None, Some(reason.clone()))
            }
            FileOutcome::Failed { message } => {
                ("error", None, None, None, None, Some(message.clone()))
            }
        };

        Self::FileComplete {
            path,
            outcome: label,
            original_size,
            new_size,
            saved_percent,
            dimensions,
            error,
        }
    }

    pub fn complete(stats: &OptimizationStats, duration_seconds: f64) -> Self {
        Self::Complete {
            stats: stats.clone(),
            duration_seconds,
        }
    }

    pub fn error(message: String, path: Option<PathBuf>) -> Self {
        Self::Error { message, path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_processor::CompressionOutcome;

    #[test]
    fn test_file_complete_compressed_shape() {
        let outcome = FileOutcome::Compressed(CompressionOutcome {
            original_size: 200,
            new_size: 50,
            original_dimensions: Dimensions::new(2000, 1000),
            new_dimensions: Dimensions::new(1200, 600),
        });
        let msg = JsonMessage::file_complete(PathBuf::from("images/a.png"), &outcome);
        let value = serde_json::to_value(&msg).unwrap();

        assert_eq!(value["type"], "file_complete");
        assert_eq!(value["outcome"], "compressed");
        assert_eq!(value["saved_percent"], 75.0);
        assert_eq!(value["dimensions"]["width"], 1200);
    }

    #[test]
    fn test_file_complete_error_shape() {
        let outcome = FileOutcome::Failed {
            message: "boom".to_string(),
        };
        let value =
            serde_json::to_value(JsonMessage::file_complete(PathBuf::from("x.jpg"), &outcome)).unwrap();

        assert_eq!(value["outcome"], "error");
        assert_eq!(value["error"], "boom");
        assert!(value["new_size"].is_null());
    }

    #[test]
    fn test_start_carries_config() {
        let value = serde_json::to_value(JsonMessage::start(&Config::default(), 7)).unwrap();
        assert_eq!(value["type"], "start");
        assert_eq!(value["total_files"], 7);
        assert_eq!(value["quality"], 80);
    }
}
