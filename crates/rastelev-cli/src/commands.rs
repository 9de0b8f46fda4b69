//! Implementations of the `rastelev` subcommands.

use crate::config::{load_properties, save_properties};
use crate::Result;
use rastelev_core::{layer_looks_like_dem, DataType, ElevationProperties, RasterSource, TiffRaster, ZRange};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Per-band summary in an [`InspectReport`].
#[derive(Debug, Clone, Serialize)]
pub struct BandReport {
    /// Band number (1-based).
    pub band: usize,
    /// Pixel type.
    pub data_type: DataType,
    /// Smallest valid value, if any.
    pub min: Option<f64>,
    /// Largest valid value, if any.
    pub max: Option<f64>,
}

/// What `rastelev inspect` reports about a raster.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    /// Layer name used by the DEM heuristic.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// No-data value, if declared.
    pub no_data: Option<f64>,
    /// Per-band details.
    pub bands: Vec<BandReport>,
    /// Verdict of the DEM heuristic.
    pub looks_like_dem: bool,
}

impl InspectReport {
    /// Build a report for a loaded raster.
    pub fn new(raster: &TiffRaster) -> Self {
        let (width, height) = raster.dimensions();
        let bands = (1..=raster.band_count())
            .map(|band| {
                let stats = raster.band_statistics(band);
                BandReport {
                    band,
                    data_type: raster.band_data_type(band),
                    min: stats.map(|s| s.min),
                    max: stats.map(|s| s.max),
                }
            })
            .collect();
        Self {
            name: raster.name().to_string(),
            width,
            height,
            no_data: raster.no_data_value(),
            bands,
            looks_like_dem: layer_looks_like_dem(raster),
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:       {}", self.name)?;
        writeln!(f, "Size:       {}x{}", self.width, self.height)?;
        match self.no_data {
            Some(nd) => writeln!(f, "No-data:    {}", nd)?,
            None => writeln!(f, "No-data:    none")?,
        }
        for band in &self.bands {
            match (band.min, band.max) {
                (Some(min), Some(max)) => writeln!(
                    f,
                    "Band {}:     {} (min {}, max {})",
                    band.band, band.data_type, min, max
                )?,
                _ => writeln!(f, "Band {}:     {} (no valid pixels)", band.band, band.data_type)?,
            }
        }
        write!(
            f,
            "Looks like a DEM: {}",
            if self.looks_like_dem { "yes" } else { "no" }
        )
    }
}

/// `rastelev inspect`: describe a raster and run the DEM heuristic.
pub fn inspect(path: &Path, name: Option<&str>, json: bool) -> Result<String> {
    let mut raster = TiffRaster::from_file(path)?;
    if let Some(name) = name {
        raster.set_name(name);
    }
    let report = InspectReport::new(&raster);
    info!(
        "{}: looks like DEM = {}",
        report.name, report.looks_like_dem
    );
    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_string())
    }
}

/// `rastelev elevation`: apply the transform of a properties file to one value.
pub fn elevation(props_path: &Path, band: usize, value: f64) -> Result<f64> {
    let props = load_properties(props_path)?;
    Ok(props.elevation_for_pixel_value(band, value))
}

/// `rastelev zrange`: elevation range of a raster under a properties file.
pub fn zrange(raster_path: &Path, props_path: &Path) -> Result<ZRange> {
    let raster = TiffRaster::from_file(raster_path)?;
    let props = load_properties(props_path)?;
    Ok(props.calculate_z_range(&raster))
}

/// `rastelev convert`: rewrite a properties file in another format.
pub fn convert(input: &Path, output: &Path) -> Result<ElevationProperties> {
    let props = load_properties(input)?;
    save_properties(&props, output)?;
    info!("Converted {} to {}", input.display(), output.display());
    Ok(props)
}

/// Human readable form of a z range.
pub fn format_zrange(range: &ZRange) -> String {
    if range.is_infinite() {
        "unknown (no statistics for the elevation band)".to_string()
    } else {
        format!("{} .. {}", range.lower, range.upper)
    }
}
