//! Line and fill symbols used to draw raster profiles.
//!
//! These are plain style records: the profile renderer consumes them, this
//! crate only stores, clones and persists them.

use crate::color::Color;
use crate::xml::{parse_attribute, XmlElement};
use roxmltree::Node;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Color shared by the default line and fill symbols.
pub const DEFAULT_STYLE_COLOR: Color = Color::rgb(0x1f, 0x78, 0xb4);

/// Default profile line width in millimeters.
pub const DEFAULT_LINE_WIDTH: f64 = 0.6;

/// Tag name of a persisted symbol element.
pub const SYMBOL_TAG: &str = "symbol";

/// Symbol used to draw the profile curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineSymbol {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in millimeters.
    pub width: f64,
}

impl LineSymbol {
    /// Create a line symbol.
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    /// Stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Serialize as a `<symbol type="line">` element.
    pub fn write_xml(&self) -> XmlElement {
        XmlElement::new(SYMBOL_TAG)
            .with_attribute("type", "line")
            .with_attribute("color", self.color.encode())
            .with_attribute("width", self.width)
    }

    /// Restore from a `<symbol type="line">` element.
    ///
    /// Returns `None` if the element is not a line symbol. Missing or invalid
    /// attributes fall back to the defaults.
    pub fn read_xml(node: Node<'_, '_>) -> Option<Self> {
        if !is_symbol_of_type(node, "line") {
            return None;
        }
        let defaults = Self::default();
        Some(Self {
            color: color_attribute(node, "color").unwrap_or(defaults.color),
            width: parse_attribute(node, "width").unwrap_or(defaults.width),
        })
    }
}

impl Default for LineSymbol {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE_COLOR, DEFAULT_LINE_WIDTH)
    }
}

/// Symbol used to fill the area above or below the profile curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSymbol {
    /// Fill color.
    pub color: Color,
    /// Outline color, `None` draws no outline.
    pub outline_color: Option<Color>,
    /// Outline width in millimeters.
    pub outline_width: f64,
}

impl FillSymbol {
    /// Create a fill symbol without an outline.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            outline_color: None,
            outline_width: 0.0,
        }
    }

    /// Add an outline.
    pub fn with_outline(mut self, color: Color, width: f64) -> Self {
        self.outline_color = Some(color);
        self.outline_width = width;
        self
    }

    /// Fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Serialize as a `<symbol type="fill">` element.
    pub fn write_xml(&self) -> XmlElement {
        let mut el = XmlElement::new(SYMBOL_TAG)
            .with_attribute("type", "fill")
            .with_attribute("color", self.color.encode())
            .with_attribute("outline_width", self.outline_width);
        if let Some(outline) = self.outline_color {
            el.set_attribute("outline_color", outline.encode());
        }
        el
    }

    /// Restore from a `<symbol type="fill">` element.
    pub fn read_xml(node: Node<'_, '_>) -> Option<Self> {
        if !is_symbol_of_type(node, "fill") {
            return None;
        }
        Some(Self {
            color: color_attribute(node, "color").unwrap_or(DEFAULT_STYLE_COLOR),
            outline_color: color_attribute(node, "outline_color"),
            outline_width: parse_attribute(node, "outline_width").unwrap_or(0.0),
        })
    }
}

impl Default for FillSymbol {
    fn default() -> Self {
        Self::new(DEFAULT_STYLE_COLOR)
    }
}

fn is_symbol_of_type(node: Node<'_, '_>, kind: &str) -> bool {
    node.is_element() && node.tag_name().name() == SYMBOL_TAG && node.attribute("type") == Some(kind)
}

fn color_attribute(node: Node<'_, '_>, key: &str) -> Option<Color> {
    let value = node.attribute(key)?;
    match value.parse() {
        Ok(color) => Some(color),
        Err(e) => {
            warn!("Ignoring symbol attribute {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reparse<T>(el: &XmlElement, read: impl Fn(Node<'_, '_>) -> Option<T>) -> Option<T> {
        let text = el.to_string();
        let doc = roxmltree::Document::parse(&text).expect("should parse");
        read(doc.root_element())
    }

    #[test]
    fn test_defaults_share_style_color() {
        assert_eq!(LineSymbol::default().color(), DEFAULT_STYLE_COLOR);
        assert_eq!(FillSymbol::default().color(), DEFAULT_STYLE_COLOR);
        assert_eq!(LineSymbol::default().width, DEFAULT_LINE_WIDTH);
        assert!(FillSymbol::default().outline_color.is_none());
    }

    #[test]
    fn test_line_symbol_xml() {
        let sym = LineSymbol::new(Color::rgb(0xff, 0x44, 0x33), 0.5);
        let el = sym.write_xml();
        assert_eq!(el.attribute("color"), Some("255,68,51,255"));

        let restored = reparse(&el, LineSymbol::read_xml).expect("line symbol");
        assert_eq!(restored, sym);
        assert_eq!(restored.color().name(), "#ff4433");
    }

    #[test]
    fn test_fill_symbol_xml_with_outline() {
        let sym = FillSymbol::new(Color::rgb(0xff, 0x44, 0xff)).with_outline(Color::rgb(0, 0, 0), 0.26);
        let restored = reparse(&sym.write_xml(), FillSymbol::read_xml).expect("fill symbol");
        assert_eq!(restored, sym);
    }

    #[test]
    fn test_fill_symbol_width_without_outline_color() {
        let mut sym = FillSymbol::new(Color::rgb(10, 20, 30));
        sym.outline_width = 0.4;
        let el = sym.write_xml();
        assert_eq!(el.attribute("outline_width"), Some("0.4"));
        assert_eq!(el.attribute("outline_color"), None);

        let restored = reparse(&el, FillSymbol::read_xml).expect("fill symbol");
        assert_eq!(restored, sym);
    }

    #[test]
    fn test_read_rejects_other_symbol_type() {
        let line = LineSymbol::default().write_xml();
        assert!(reparse(&line, FillSymbol::read_xml).is_none());

        let fill = FillSymbol::default().write_xml();
        assert!(reparse(&fill, LineSymbol::read_xml).is_none());
    }

    #[test]
    fn test_invalid_attributes_fall_back() {
        let doc = roxmltree::Document::parse(r#"<symbol type="line" color="nope" width="wide"/>"#)
            .expect("should parse");
        let sym = LineSymbol::read_xml(doc.root_element()).expect("line symbol");
        assert_eq!(sym, LineSymbol::default());
    }
}
