//! Raster layer backed by a single-image TIFF file.

use crate::raster::{BandStatistics, DataType, RasterSource};
use crate::{ElevationError, Result};
use std::io::{Read, Seek};
use std::path::Path;
use tiff::decoder::ifd::Value;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tracing::debug;

/// TIFF SampleFormat values.
const SAMPLE_FORMAT_UINT: u32 = 1;
const SAMPLE_FORMAT_INT: u32 = 2;
const SAMPLE_FORMAT_IEEE_FP: u32 = 3;
const SAMPLE_FORMAT_COMPLEX_INT: u32 = 5;
const SAMPLE_FORMAT_COMPLEX_IEEE_FP: u32 = 6;

/// A raster layer read from a TIFF file.
///
/// All samples are decoded up front and kept pixel-interleaved, so a
/// three-band image stores `r, g, b, r, g, b, ...`.
#[derive(Debug, Clone)]
pub struct TiffRaster {
    /// Display name, initially the file stem.
    name: String,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Samples per pixel.
    band_count: usize,
    /// Pixel type shared by every band.
    data_type: DataType,
    /// Pixels equal to this value are treated as missing.
    no_data_value: Option<f64>,
    /// Decoded samples in row-major, pixel-interleaved order.
    data: Vec<f64>,
}

impl TiffRaster {
    /// Open a TIFF file, naming the layer after the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let file = std::fs::File::open(path)?;
        let raster = Self::from_reader(file, name)?;
        debug!(
            "Opened {} ({}x{}, {} band(s), {})",
            path.display(),
            raster.width,
            raster.height,
            raster.band_count,
            raster.data_type
        );
        Ok(raster)
    }

    /// Read a TIFF image from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R, name: impl Into<String>) -> Result<Self> {
        let mut decoder = Decoder::new(reader)?;

        // Allow large elevation rasters; the defaults reject anything over 256 MB
        let mut limits = Limits::default();
        limits.decoding_buffer_size = 1024 * 1024 * 1024;
        limits.intermediate_buffer_size = 1024 * 1024 * 1024;
        limits.ifd_value_size = 1024 * 1024 * 1024;
        decoder = decoder.with_limits(limits);

        let (width, height) = decoder.dimensions()?;
        let band_count = Self::read_samples_per_pixel(&mut decoder)?;
        let data_type = Self::read_data_type(&mut decoder)?;
        let no_data_value = Self::read_nodata_value(&mut decoder);
        let data = Self::decode_samples(&mut decoder)?;

        Ok(Self {
            name: name.into(),
            width,
            height,
            band_count,
            data_type,
            no_data_value,
            data,
        })
    }

    fn read_samples_per_pixel<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<usize> {
        // The tag defaults to 1 when absent
        let samples = decoder
            .find_tag(Tag::SamplesPerPixel)?
            .map(|v| v.into_u32())
            .transpose()?
            .unwrap_or(1);
        Ok(samples as usize)
    }

    fn read_data_type<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<DataType> {
        // Both tags hold one value per sample; all bands share the first one
        let bits = decoder
            .find_tag(Tag::BitsPerSample)?
            .map(first_u32)
            .transpose()?
            .flatten()
            .unwrap_or(1);
        let format = decoder
            .find_tag(Tag::SampleFormat)?
            .map(first_u32)
            .transpose()?
            .flatten()
            .unwrap_or(SAMPLE_FORMAT_UINT);
        Ok(data_type_for(format, bits))
    }

    /// Try to read the no-data value from the GDAL_NODATA tag (42113).
    ///
    /// GDAL stores it as an ASCII string.
    fn read_nodata_value<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
        decoder
            .get_tag_ascii_string(Tag::GdalNodata)
            .ok()
            .and_then(|s| s.trim().trim_end_matches('\0').parse().ok())
    }

    fn decode_samples<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Vec<f64>> {
        let result = decoder.read_image()?;

        Ok(match result {
            DecodingResult::F32(data) => data.into_iter().map(f64::from).collect(),
            DecodingResult::F64(data) => data,
            DecodingResult::I16(data) => data.into_iter().map(f64::from).collect(),
            DecodingResult::I32(data) => data.into_iter().map(f64::from).collect(),
            DecodingResult::U16(data) => data.into_iter().map(f64::from).collect(),
            DecodingResult::U32(data) => data.into_iter().map(f64::from).collect(),
            DecodingResult::U8(data) => data.into_iter().map(f64::from).collect(),
            DecodingResult::I8(data) => data.into_iter().map(f64::from).collect(),
            DecodingResult::U64(data) => data.into_iter().map(|v| v as f64).collect(),
            DecodingResult::I64(data) => data.into_iter().map(|v| v as f64).collect(),
        })
    }

    /// Rename the layer.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Dimensions in pixels as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The no-data value, if the file declares one.
    pub fn no_data_value(&self) -> Option<f64> {
        self.no_data_value
    }

    /// Raw value of `band` at pixel `(x, y)`.
    ///
    /// Returns `Ok(None)` for NaN or no-data pixels.
    pub fn pixel_value(&self, band: usize, x: u32, y: u32) -> Result<Option<f64>> {
        if band == 0 || band > self.band_count {
            return Err(ElevationError::InvalidBand {
                band,
                band_count: self.band_count,
            });
        }
        if x >= self.width || y >= self.height {
            return Err(ElevationError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let idx = (y as usize * self.width as usize + x as usize) * self.band_count + (band - 1);
        let value = *self
            .data
            .get(idx)
            .ok_or(ElevationError::TruncatedData {
                expected: idx + 1,
                actual: self.data.len(),
            })?;
        if value.is_nan() || self.no_data_value == Some(value) {
            return Ok(None);
        }
        Ok(Some(value))
    }
}

impl RasterSource for TiffRaster {
    fn name(&self) -> &str {
        &self.name
    }

    fn band_count(&self) -> usize {
        self.band_count
    }

    fn band_data_type(&self, band: usize) -> DataType {
        if band >= 1 && band <= self.band_count {
            self.data_type
        } else {
            DataType::Unknown
        }
    }

    fn band_statistics(&self, band: usize) -> Option<BandStatistics> {
        if band == 0 || band > self.band_count {
            return None;
        }
        let samples = self
            .data
            .iter()
            .skip(band - 1)
            .step_by(self.band_count)
            .copied();
        BandStatistics::from_values(samples, self.no_data_value)
    }
}

/// First entry of a scalar or list tag value.
fn first_u32(value: Value) -> tiff::TiffResult<Option<u32>> {
    match value {
        Value::List(values) => values.into_iter().next().map(Value::into_u32).transpose(),
        other => other.into_u32().map(Some),
    }
}

/// Map TIFF SampleFormat and BitsPerSample to a pixel type.
fn data_type_for(sample_format: u32, bits: u32) -> DataType {
    match (sample_format, bits) {
        (SAMPLE_FORMAT_UINT, 8) => DataType::Byte,
        (SAMPLE_FORMAT_UINT, 16) => DataType::UInt16,
        (SAMPLE_FORMAT_UINT, 32) => DataType::UInt32,
        (SAMPLE_FORMAT_INT, 8) => DataType::Int8,
        (SAMPLE_FORMAT_INT, 16) => DataType::Int16,
        (SAMPLE_FORMAT_INT, 32) => DataType::Int32,
        (SAMPLE_FORMAT_IEEE_FP, 32) => DataType::Float32,
        (SAMPLE_FORMAT_IEEE_FP, 64) => DataType::Float64,
        (SAMPLE_FORMAT_COMPLEX_INT, 32) => DataType::CInt16,
        (SAMPLE_FORMAT_COMPLEX_INT, 64) => DataType::CInt32,
        (SAMPLE_FORMAT_COMPLEX_IEEE_FP, 64) => DataType::CFloat32,
        (SAMPLE_FORMAT_COMPLEX_IEEE_FP, 128) => DataType::CFloat64,
        _ => DataType::Unknown,
    }
}
