//! Raster capabilities consumed by elevation properties and DEM detection.

use serde::{Deserialize, Serialize};

/// Pixel data type of a raster band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Unknown or unsupported type.
    Unknown,
    /// Unsigned 8-bit integer.
    Byte,
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 32-bit integer.
    Int32,
    /// 32-bit IEEE float.
    Float32,
    /// 64-bit IEEE float.
    Float64,
    /// Complex of two signed 16-bit integers.
    CInt16,
    /// Complex of two signed 32-bit integers.
    CInt32,
    /// Complex of two 32-bit floats.
    CFloat32,
    /// Complex of two 64-bit floats.
    CFloat64,
    /// Packed 8-bit ARGB color.
    Argb32,
    /// Packed 8-bit ARGB color with premultiplied alpha.
    Argb32Premultiplied,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Unknown => "Unknown",
            DataType::Byte => "Byte",
            DataType::Int8 => "Int8",
            DataType::UInt16 => "UInt16",
            DataType::Int16 => "Int16",
            DataType::UInt32 => "UInt32",
            DataType::Int32 => "Int32",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
            DataType::CInt16 => "CInt16",
            DataType::CInt32 => "CInt32",
            DataType::CFloat32 => "CFloat32",
            DataType::CFloat64 => "CFloat64",
            DataType::Argb32 => "ARGB32",
            DataType::Argb32Premultiplied => "ARGB32_Premultiplied",
        };
        write!(f, "{}", name)
    }
}

/// Minimum and maximum of the valid pixels in a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStatistics {
    /// Smallest valid value.
    pub min: f64,
    /// Largest valid value.
    pub max: f64,
    /// Number of pixels that contributed.
    pub valid_count: usize,
}

impl BandStatistics {
    /// Compute statistics over `values`, skipping NaN and `no_data` pixels.
    ///
    /// Returns `None` if no pixel is valid.
    pub fn from_values(values: impl IntoIterator<Item = f64>, no_data: Option<f64>) -> Option<Self> {
        let mut stats: Option<Self> = None;
        for v in values {
            if v.is_nan() || no_data.is_some_and(|nd| v == nd) {
                continue;
            }
            match stats.as_mut() {
                Some(s) => {
                    s.min = s.min.min(v);
                    s.max = s.max.max(v);
                    s.valid_count += 1;
                }
                None => {
                    stats = Some(Self {
                        min: v,
                        max: v,
                        valid_count: 1,
                    })
                }
            }
        }
        stats
    }
}

/// The metadata a raster layer exposes to elevation handling.
///
/// Bands are numbered from 1.
pub trait RasterSource {
    /// Display name of the layer.
    fn name(&self) -> &str;

    /// Number of bands.
    fn band_count(&self) -> usize;

    /// Pixel type of `band`, [`DataType::Unknown`] if the band does not exist.
    fn band_data_type(&self, band: usize) -> DataType;

    /// Number of raster attribute tables attached to the layer.
    fn attribute_table_count(&self) -> usize {
        0
    }

    /// Min/max of `band`, if it exists and has valid pixels.
    fn band_statistics(&self, _band: usize) -> Option<BandStatistics> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
struct MemoryBand {
    data_type: DataType,
    values: Vec<f64>,
}

/// A raster held entirely in memory.
///
/// Useful as a lightweight layer stand-in when the pixel source is not a file.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryRaster {
    name: String,
    bands: Vec<MemoryBand>,
    attribute_tables: usize,
    no_data: Option<f64>,
}

impl InMemoryRaster {
    /// Create a raster with no bands.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bands: Vec::new(),
            attribute_tables: 0,
            no_data: None,
        }
    }

    /// Append a band with the given type and pixel values.
    pub fn with_band(mut self, data_type: DataType, values: Vec<f64>) -> Self {
        self.bands.push(MemoryBand { data_type, values });
        self
    }

    /// Attach a raster attribute table.
    pub fn with_attribute_table(mut self) -> Self {
        self.attribute_tables += 1;
        self
    }

    /// Set the value treated as missing data.
    pub fn with_no_data(mut self, no_data: f64) -> Self {
        self.no_data = Some(no_data);
        self
    }

    /// Rename the layer.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    fn band(&self, band: usize) -> Option<&MemoryBand> {
        band.checked_sub(1).and_then(|i| self.bands.get(i))
    }
}

impl RasterSource for InMemoryRaster {
    fn name(&self) -> &str {
        &self.name
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn band_data_type(&self, band: usize) -> DataType {
        self.band(band).map_or(DataType::Unknown, |b| b.data_type)
    }

    fn attribute_table_count(&self) -> usize {
        self.attribute_tables
    }

    fn band_statistics(&self, band: usize) -> Option<BandStatistics> {
        let band = self.band(band)?;
        BandStatistics::from_values(band.values.iter().copied(), self.no_data)
    }
}
