//! Error types for the elevation crate.

use thiserror::Error;

/// Errors that can occur when reading rasters or persisted properties.
#[derive(Debug, Error)]
pub enum ElevationError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error.
    #[error("TIFF decode error: {0}")]
    TiffDecode(#[from] tiff::TiffError),

    /// The XML text could not be parsed at all.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A color string was not in any recognized encoding.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A profile symbology name was not recognized.
    #[error("Unknown profile symbology: {0}")]
    UnknownSymbology(String),

    /// Pixel coordinate is outside the raster.
    #[error("Pixel ({x}, {y}) is outside raster dimensions {width}x{height}")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Raster width in pixels.
        width: u32,
        /// Raster height in pixels.
        height: u32,
    },

    /// Band number outside `1..=band_count`.
    #[error("Invalid band {band} (raster has {band_count} bands)")]
    InvalidBand {
        /// Requested band (1-based).
        band: usize,
        /// Number of bands in the raster.
        band_count: usize,
    },

    /// Decoded sample buffer is shorter than the raster layout implies.
    #[error("Raster data truncated: needed {expected} samples, found {actual}")]
    TruncatedData {
        /// Samples needed to reach the requested pixel.
        expected: usize,
        /// Samples actually decoded.
        actual: usize,
    },
}
