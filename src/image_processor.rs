//! # Image Processing Module
//!
//! Questo modulo ricomprime una singola immagine: decode, resize e re-encode
//! JPEG lossy, tutto in-process con il crate `image`.
//!
//! ## Pipeline di Ricompressione
//!
//! 1. **Lettura**: i byte sorgente vengono letti con `tokio::fs`
//! 2. **Decode**: formato rilevato dal contenuto, non dall'estensione
//! 3. **Resize**: lato lungo limitato a `max_width`, mai ingrandito
//!    (vedi [`crate::resize::bounded_dimensions`]), filtro Lanczos3
//! 4. **Encode**: JPEG alla `quality` configurata, canale alpha scartato
//! 5. **Scrittura**: stesso nome ed estensione del file sorgente
//!
//! I passi 2-4 sono CPU-bound e girano in `spawn_blocking`; il chiamante
//! attende il risultato prima di passare al file successivo.
//!
//! ## Formati Supportati
//!
//! | Formato | Input | Output |
//! |---------|-------|--------|
//! | JPEG    | ✅    | JPEG   |
//! | PNG     | ✅    | JPEG (nome `.png` invariato) |
//! | WebP    | ✅    | JPEG (nome `.webp` invariato) |
//!
//! ## Error Handling
//!
//! Ogni errore porta con sé il path coinvolto. Un file più grande dopo la
//! ricompressione non è un errore: `saved_percent()` diventa negativo.
//!
//! ## Esempio
//!
//! ```rust,ignore
//! let processor = ImageProcessor::new(&config);
//! let outcome = processor.compress(&input_path, &output_path).await?;
//! println!("saved {:.2}%", outcome.saved_percent());
//! ```

use crate::config::Config;
use crate::error::CompressError;
use crate::file_manager::FileManager;
use crate::optimizer::path_resolver::PathResolver;
use crate::resize::{bounded_dimensions, Dimensions};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::GenericImageView;
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Result of recompressing one image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionOutcome {
    pub original_size: u64,
    pub new_size: u64,
    pub original_dimensions: Dimensions,
    pub new_dimensions: Dimensions,
}

impl CompressionOutcome {
    /// Percentage saved; negative when the output is larger
    pub fn saved_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.original_size, self.new_size)
    }

    /// Bytes saved; negative when the output is larger
    pub fn saved_bytes(&self) -> i64 {
        self.original_size as i64 - self.new_size as i64
    }

    pub fn was_resized(&self) -> bool {
        self.original_dimensions != self.new_dimensions
    }
}

/// Recompresses images to a bounded size and fixed JPEG quality
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    max_width: u32,
    quality: u8,
}

impl ImageProcessor {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(config.max_width, config.quality)
    }

    pub fn with_settings(max_width: u32, quality: u8) -> Self {
        Self { max_width, quality }
    }

    /// Recompress `input` and write the result to `output`.
    ///
    /// The parent directory of `output` is created when missing.
    pub async fn compress(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<CompressionOutcome, CompressError> {
        let original_size = FileManager::get_file_size(input).await?;
        let bytes = fs::read(input).await.map_err(|source| CompressError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let path = input.to_path_buf();
        let (max_width, quality) = (self.max_width, self.quality);
        let (encoded, original_dimensions, new_dimensions) =
            tokio::task::spawn_blocking(move || recompress(&path, &bytes, max_width, quality))
                .await??;

        PathResolver::ensure_parent_dirs(output).await?;
        fs::write(output, &encoded)
            .await
            .map_err(|source| CompressError::Write {
                path: output.to_path_buf(),
                source,
            })?;

        let new_size = FileManager::get_file_size(output).await?;
        debug!(
            "Recompressed {} {} -> {} ({} -> {} bytes)",
            input.display(),
            original_dimensions,
            new_dimensions,
            original_size,
            new_size
        );

        Ok(CompressionOutcome {
            original_size,
            new_size,
            original_dimensions,
            new_dimensions,
        })
    }
}

/// Decode, bound and re-encode an in-memory image
fn recompress(
    path: &Path,
    bytes: &[u8],
    max_width: u32,
    quality: u8,
) -> Result<(Vec<u8>, Dimensions, Dimensions), CompressError> {
    let decoded = image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|source| CompressError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(|source| CompressError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let (width, height) = decoded.dimensions();
    let original = Dimensions::new(width, height);
    let target = bounded_dimensions(original, max_width);

    let rgb = decoded.to_rgb8();
    let rgb = if target != original {
        imageops::resize(&rgb, target.width, target.height, FilterType::Lanczos3)
    } else {
        rgb
    };

    let mut encoded = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
        encoder
            .encode_image(&rgb)
            .map_err(|source| CompressError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
    }

    Ok((encoded, original, target))
}
