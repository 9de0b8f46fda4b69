//! # rastelev-core
//!
//! Elevation handling for raster map layers.
//!
//! This crate decides how the pixel values of a raster layer are read as
//! elevations for profile plots and 3D views:
//! - [`ElevationProperties`] holds the enable flag, elevation band, z scale and
//!   offset, and the profile symbology, and persists them as XML
//! - [`layer_looks_like_dem`] guesses whether a raster is a digital elevation
//!   model from its band layout, pixel type and name
//! - [`RasterSource`] is the small set of layer metadata both of them need,
//!   implemented by [`InMemoryRaster`] and the TIFF reader [`TiffRaster`]
//!
//! ## Example
//!
//! ```no_run
//! use rastelev_core::{layer_looks_like_dem, ElevationProperties, TiffRaster};
//!
//! let raster = TiffRaster::from_file("srtm_n47e008.tif")?;
//!
//! let mut props = ElevationProperties::new(None);
//! props.set_enabled(layer_looks_like_dem(&raster));
//! props.set_z_scale(0.1);
//!
//! if let Some(value) = raster.pixel_value(1, 10, 10)? {
//!     println!("Elevation: {} m", props.elevation_for_pixel_value(1, value));
//! }
//! println!("{}", props.to_xml_string());
//! # Ok::<(), rastelev_core::ElevationError>(())
//! ```

mod color;
mod dem;
mod error;
mod properties;
mod raster;
mod symbol;
mod tiff_raster;
pub mod xml;

pub use color::Color;
pub use dem::{is_elevation_data_type, layer_looks_like_dem, name_suggests_dem};
pub use error::ElevationError;
pub use properties::{ElevationProperties, LayerId, ProfileSurfaceSymbology, ZRange, ELEVATION_TAG};
pub use raster::{BandStatistics, DataType, InMemoryRaster, RasterSource};
pub use symbol::{FillSymbol, LineSymbol, DEFAULT_LINE_WIDTH, DEFAULT_STYLE_COLOR};
pub use tiff_raster::TiffRaster;

/// Result type for elevation operations.
pub type Result<T> = std::result::Result<T, ElevationError>;
