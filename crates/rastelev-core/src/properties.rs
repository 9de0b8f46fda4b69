//! Elevation properties of a raster layer.
//!
//! [`ElevationProperties`] decides whether a raster layer's pixel values are
//! elevations, which band carries them and how raw values are scaled into
//! real-world heights. It also holds the symbology used when the layer is
//! drawn in an elevation profile.

use crate::raster::RasterSource;
use crate::symbol::{FillSymbol, LineSymbol};
use crate::xml::{bool_attribute, encode_bool, first_child_element, parse_attribute, XmlElement};
use crate::{ElevationError, Result};
use roxmltree::Node;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Tag name of the persisted properties element.
pub const ELEVATION_TAG: &str = "elevation";

const LINE_SYMBOL_TAG: &str = "profileLineSymbol";
const FILL_SYMBOL_TAG: &str = "profileFillSymbol";

/// Identifier of the raster layer that owns a set of properties.
///
/// This is a handle, not an owning reference: the layer owns its properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub String);

impl LayerId {
    /// Create a layer id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a surface is drawn in elevation profile plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProfileSurfaceSymbology {
    /// Draw the profile as a line.
    #[default]
    Line,
    /// Fill the area below the profile.
    FillBelow,
    /// Fill the area above the profile.
    FillAbove,
}

impl std::fmt::Display for ProfileSurfaceSymbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileSurfaceSymbology::Line => write!(f, "Line"),
            ProfileSurfaceSymbology::FillBelow => write!(f, "FillBelow"),
            ProfileSurfaceSymbology::FillAbove => write!(f, "FillAbove"),
        }
    }
}

impl FromStr for ProfileSurfaceSymbology {
    type Err = ElevationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Line" => Ok(ProfileSurfaceSymbology::Line),
            "FillBelow" => Ok(ProfileSurfaceSymbology::FillBelow),
            "FillAbove" => Ok(ProfileSurfaceSymbology::FillAbove),
            other => Err(ElevationError::UnknownSymbology(other.to_string())),
        }
    }
}

/// A closed range of z values; either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZRange {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl ZRange {
    /// Create a range.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// The range covering every z value.
    pub fn infinite() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// True if both ends are unbounded.
    pub fn is_infinite(&self) -> bool {
        self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY
    }

    /// Check if `z` lies within the range.
    pub fn contains(&self, z: f64) -> bool {
        z >= self.lower && z <= self.upper
    }

    /// Check if two ranges share at least one value.
    pub fn overlaps(&self, other: &ZRange) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

impl Default for ZRange {
    fn default() -> Self {
        Self::infinite()
    }
}

/// Elevation handling settings of a raster layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationProperties {
    #[serde(skip)]
    owner: Option<LayerId>,
    enabled: bool,
    #[serde(deserialize_with = "deserialize_band_number")]
    band_number: usize,
    z_scale: f64,
    z_offset: f64,
    #[serde(deserialize_with = "deserialize_elevation_limit")]
    elevation_limit: Option<f64>,
    profile_symbology: ProfileSurfaceSymbology,
    profile_line_symbol: LineSymbol,
    profile_fill_symbol: FillSymbol,
}

// Deserialized values go through the same rules as the setters.
fn deserialize_band_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<usize, D::Error> {
    let band = usize::deserialize(deserializer)?;
    if band == 0 {
        warn!("Band numbers start at 1, using band 1");
    }
    Ok(band.max(1))
}

fn deserialize_elevation_limit<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.filter(|l| !l.is_nan()))
}

impl Default for ElevationProperties {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ElevationProperties {
    /// Create properties with default settings for the given owning layer.
    pub fn new(owner: Option<LayerId>) -> Self {
        Self {
            owner,
            enabled: false,
            band_number: 1,
            z_scale: 1.0,
            z_offset: 0.0,
            elevation_limit: None,
            profile_symbology: ProfileSurfaceSymbology::Line,
            profile_line_symbol: LineSymbol::default(),
            profile_fill_symbol: FillSymbol::default(),
        }
    }

    /// The layer these properties belong to.
    pub fn owner(&self) -> Option<&LayerId> {
        self.owner.as_ref()
    }

    /// Attach the properties to a layer.
    pub fn set_owner(&mut self, owner: Option<LayerId>) {
        self.owner = owner;
    }

    /// Whether the layer values represent an elevation surface.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable elevation handling.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// True when the layer has elevation data, which is whenever it is enabled.
    pub fn has_elevation(&self) -> bool {
        self.enabled
    }

    /// Band (1-based) from which elevations are taken.
    pub fn band_number(&self) -> usize {
        self.band_number
    }

    /// Set the elevation band. Band 0 does not exist and is clamped to 1.
    pub fn set_band_number(&mut self, band: usize) {
        if band == 0 {
            warn!("Band numbers start at 1, using band 1");
        }
        self.band_number = band.max(1);
    }

    /// Multiplier applied to raw pixel values.
    pub fn z_scale(&self) -> f64 {
        self.z_scale
    }

    /// Set the multiplier applied to raw pixel values.
    pub fn set_z_scale(&mut self, scale: f64) {
        self.z_scale = scale;
    }

    /// Offset added after scaling.
    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    /// Set the offset added after scaling.
    pub fn set_z_offset(&mut self, offset: f64) {
        self.z_offset = offset;
    }

    /// Elevation that bounds the fill in `FillBelow`/`FillAbove` mode.
    pub fn elevation_limit(&self) -> Option<f64> {
        self.elevation_limit
    }

    /// Set or clear the fill elevation limit. NaN clears it.
    pub fn set_elevation_limit(&mut self, limit: Option<f64>) {
        self.elevation_limit = limit.filter(|l| !l.is_nan());
    }

    /// Profile drawing mode.
    pub fn profile_symbology(&self) -> ProfileSurfaceSymbology {
        self.profile_symbology
    }

    /// Set the profile drawing mode.
    pub fn set_profile_symbology(&mut self, symbology: ProfileSurfaceSymbology) {
        self.profile_symbology = symbology;
    }

    /// Symbol for the profile line.
    pub fn profile_line_symbol(&self) -> &LineSymbol {
        &self.profile_line_symbol
    }

    /// Replace the profile line symbol.
    pub fn set_profile_line_symbol(&mut self, symbol: LineSymbol) {
        self.profile_line_symbol = symbol;
    }

    /// Symbol for profile fills.
    pub fn profile_fill_symbol(&self) -> &FillSymbol {
        &self.profile_fill_symbol
    }

    /// Replace the profile fill symbol.
    pub fn set_profile_fill_symbol(&mut self, symbol: FillSymbol) {
        self.profile_fill_symbol = symbol;
    }

    /// Convert a raw pixel value from `band` into an elevation.
    ///
    /// Returns NaN when elevation handling is disabled or `band` is not the
    /// elevation band.
    pub fn elevation_for_pixel_value(&self, band: usize, pixel_value: f64) -> f64 {
        if !self.enabled || band != self.band_number {
            return f64::NAN;
        }
        pixel_value * self.z_scale + self.z_offset
    }

    /// Raster layers have no z range restriction, so they are always visible.
    pub fn is_visible_in_z_range(&self, _range: &ZRange) -> bool {
        true
    }

    /// Elevation range covered by `raster`.
    ///
    /// Uses the statistics of the elevation band mapped through the z
    /// transform. Falls back to the infinite range if the band is missing or
    /// has no valid pixels.
    pub fn calculate_z_range(&self, raster: &dyn RasterSource) -> ZRange {
        if self.band_number > raster.band_count() {
            return ZRange::infinite();
        }
        match raster.band_statistics(self.band_number) {
            Some(stats) => {
                let a = stats.min * self.z_scale + self.z_offset;
                let b = stats.max * self.z_scale + self.z_offset;
                ZRange::new(a.min(b), a.max(b))
            }
            None => ZRange::infinite(),
        }
    }

    /// Whether the layer should appear in new elevation profile plots.
    pub fn show_by_default_in_elevation_profile_plots(&self) -> bool {
        self.enabled
    }

    /// Short HTML list items describing the transform.
    pub fn html_summary(&self) -> String {
        let items = [
            format!("Elevation band: {}", self.band_number),
            format!("Scale: {}", self.z_scale),
            format!("Offset: {}", self.z_offset),
        ];
        format!("<li>{}</li>", items.join("</li><li>"))
    }

    /// Serialize into an `<elevation>` element.
    pub fn write_xml(&self) -> XmlElement {
        let mut el = XmlElement::new(ELEVATION_TAG)
            .with_attribute("enabled", encode_bool(self.enabled))
            .with_attribute("band", self.band_number)
            .with_attribute("zscale", self.z_scale)
            .with_attribute("zoffset", self.z_offset)
            .with_attribute("symbology", self.profile_symbology);
        if let Some(limit) = self.elevation_limit {
            el.set_attribute("elevationLimit", limit);
        }
        el.append_child(
            XmlElement::new(LINE_SYMBOL_TAG).with_child(self.profile_line_symbol.write_xml()),
        );
        el.append_child(
            XmlElement::new(FILL_SYMBOL_TAG).with_child(self.profile_fill_symbol.write_xml()),
        );
        el
    }

    /// Serialize to an XML string.
    pub fn to_xml_string(&self) -> String {
        self.write_xml().to_string()
    }

    /// Restore settings from `node`, which is either an `<elevation>` element
    /// or a parent containing one.
    ///
    /// Returns false, leaving `self` unchanged, if there is no `<elevation>`
    /// element. Missing or invalid values reset that setting to its default.
    pub fn read_xml(&mut self, node: Node<'_, '_>) -> bool {
        let element = if node.is_element() && node.tag_name().name() == ELEVATION_TAG {
            node
        } else {
            match first_child_element(node, ELEVATION_TAG) {
                Some(element) => element,
                None => return false,
            }
        };

        let defaults = Self::new(None);

        self.enabled = bool_attribute(element, "enabled").unwrap_or(defaults.enabled);
        self.z_scale = parse_attribute(element, "zscale").unwrap_or(defaults.z_scale);
        self.z_offset = parse_attribute(element, "zoffset").unwrap_or(defaults.z_offset);
        self.elevation_limit = parse_attribute::<f64>(element, "elevationLimit").filter(|l| !l.is_nan());

        self.band_number = match parse_attribute::<usize>(element, "band") {
            Some(band) if band >= 1 => band,
            Some(_) => {
                warn!("Ignoring invalid elevation band 0");
                defaults.band_number
            }
            None => defaults.band_number,
        };

        self.profile_symbology = match element.attribute("symbology").map(str::parse::<ProfileSurfaceSymbology>) {
            Some(Ok(symbology)) => symbology,
            Some(Err(e)) => {
                warn!("{}", e);
                defaults.profile_symbology
            }
            None => defaults.profile_symbology,
        };

        self.profile_line_symbol = first_child_element(element, LINE_SYMBOL_TAG)
            .and_then(|wrapper| wrapper.children().find_map(LineSymbol::read_xml))
            .unwrap_or(defaults.profile_line_symbol);
        self.profile_fill_symbol = first_child_element(element, FILL_SYMBOL_TAG)
            .and_then(|wrapper| wrapper.children().find_map(FillSymbol::read_xml))
            .unwrap_or(defaults.profile_fill_symbol);

        true
    }

    /// Parse `text` and restore settings with [`read_xml`](Self::read_xml)
    /// applied to the document's root element.
    ///
    /// Only fails if the text is not well-formed XML.
    pub fn read_xml_str(&mut self, text: &str) -> Result<bool> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(self.read_xml(doc.root_element()))
    }
}
