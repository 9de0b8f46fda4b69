//! Round-trip and heuristic tests against the public API.

use rastelev_core::{
    layer_looks_like_dem, Color, DataType, ElevationProperties, FillSymbol, InMemoryRaster,
    LayerId, LineSymbol, ProfileSurfaceSymbology, RasterSource, TiffRaster,
};
use std::io::Cursor;
use tiff::encoder::{colortype, TiffEncoder};

/// Properties with every field moved off its default.
fn configured_properties() -> ElevationProperties {
    let mut props = ElevationProperties::new(Some(LayerId::new("layer_1")));
    props.set_z_offset(0.5);
    props.set_z_scale(2.0);
    props.set_band_number(2);
    props.set_enabled(true);
    props.set_profile_symbology(ProfileSurfaceSymbology::FillBelow);
    props.set_elevation_limit(Some(909.0));
    props.set_profile_line_symbol(LineSymbol::new(Color::rgb(0xff, 0x44, 0x33), 0.5));
    props.set_profile_fill_symbol(FillSymbol::new(Color::rgb(0xff, 0x44, 0xff)));
    props
}

fn assert_configured(props: &ElevationProperties) {
    assert_eq!(props.z_scale(), 2.0);
    assert_eq!(props.z_offset(), 0.5);
    assert!(props.is_enabled());
    assert!(props.has_elevation());
    assert_eq!(props.band_number(), 2);
    assert_eq!(props.profile_line_symbol().color().name(), "#ff4433");
    assert_eq!(props.profile_line_symbol().width, 0.5);
    assert_eq!(props.profile_fill_symbol().color().name(), "#ff44ff");
    assert_eq!(props.profile_symbology(), ProfileSurfaceSymbology::FillBelow);
    assert_eq!(props.elevation_limit(), Some(909.0));
}

#[test]
fn test_xml_roundtrip() {
    let props = configured_properties();
    let doc = format!("<test>{}</test>", props.to_xml_string());

    let mut restored = ElevationProperties::new(None);
    assert!(restored.read_xml_str(&doc).expect("well-formed XML"));
    assert_configured(&restored);

    // The owner is a property of the live layer, not of the document
    assert!(restored.owner().is_none());
    restored.set_owner(props.owner().cloned());
    assert_eq!(restored, props);
}

#[test]
fn test_xml_roundtrip_awkward_values() {
    let mut props = ElevationProperties::new(None);
    props.set_enabled(true);
    props.set_z_scale(0.1 + 0.2);
    props.set_z_offset(-1e-300);
    props.set_elevation_limit(Some(f64::MAX));
    props.set_profile_symbology(ProfileSurfaceSymbology::FillAbove);
    props.set_profile_fill_symbol(
        FillSymbol::new(Color::rgba(1, 2, 3, 4)).with_outline(Color::rgb(5, 6, 7), 0.26),
    );

    let mut restored = ElevationProperties::new(None);
    assert!(restored.read_xml_str(&props.to_xml_string()).expect("well-formed XML"));
    assert_eq!(restored, props);
}

#[test]
fn test_clone() {
    let props = configured_properties();
    let copy = props.clone();
    assert_configured(&copy);
    assert_eq!(copy, props);
}

#[test]
fn test_yaml_roundtrip() {
    let props = configured_properties();
    let yaml = serde_yaml::to_string(&props).expect("serialize");
    let mut restored: ElevationProperties = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_configured(&restored);

    restored.set_owner(Some(LayerId::new("layer_1")));
    assert_eq!(restored, props);
}

#[test]
fn test_partial_yaml_fills_defaults() {
    let props: ElevationProperties =
        serde_yaml::from_str("enabled: true\nz_scale: 0.1\n").expect("deserialize");
    assert!(props.is_enabled());
    assert_eq!(props.z_scale(), 0.1);
    assert_eq!(props.z_offset(), 0.0);
    assert_eq!(props.band_number(), 1);
    assert_eq!(props.profile_symbology(), ProfileSurfaceSymbology::Line);
}

#[test]
fn test_yaml_values_follow_setter_rules() {
    let props: ElevationProperties =
        serde_yaml::from_str("band_number: 0\nelevation_limit: .nan\n").expect("deserialize");
    assert_eq!(props.band_number(), 1);
    assert_eq!(props.elevation_limit(), None);
    assert_eq!(props, ElevationProperties::default());

    let mut from_xml = ElevationProperties::default();
    assert!(from_xml.read_xml_str(&props.to_xml_string()).expect("well-formed"));
    assert_eq!(from_xml, props);
}

fn tiff_bytes(
    write: impl FnOnce(&mut TiffEncoder<&mut Cursor<Vec<u8>>>) -> tiff::TiffResult<()>,
) -> Cursor<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buf).expect("encoder");
        write(&mut encoder).expect("write image");
    }
    buf.set_position(0);
    buf
}

#[test]
fn test_looks_like_dem_from_tiff() {
    // not like a dem, the layer has multiple bands
    let rgb = tiff_bytes(|e| e.write_image::<colortype::RGB8>(2, 2, &[0u8; 12]));
    let layer = TiffRaster::from_reader(rgb, "i am not a dem").expect("decode");
    assert_eq!(layer.band_count(), 3);
    assert!(!layer_looks_like_dem(&layer));

    // data type doesn't look like a dem
    let byte = tiff_bytes(|e| e.write_image::<colortype::Gray8>(2, 2, &[1u8, 2, 3, 4]));
    let layer = TiffRaster::from_reader(byte, "i am not a dem").expect("decode");
    assert_eq!(layer.band_data_type(1), DataType::Byte);
    assert!(!layer_looks_like_dem(&layer));

    let float = tiff_bytes(|e| {
        e.write_image::<colortype::Gray32Float>(2, 2, &[1.0f32, 2.0, 3.0, 4.0])
    });
    let mut layer = TiffRaster::from_reader(float, "my layer").expect("decode");

    // the name doesn't hint at a dem
    assert!(!layer_looks_like_dem(&layer));
    layer.set_name("i am a DEM");
    assert!(layer_looks_like_dem(&layer));
    layer.set_name("i am a raster");
    assert!(!layer_looks_like_dem(&layer));
    layer.set_name("i am a aster satellite layer");
    assert!(layer_looks_like_dem(&layer));
}

#[test]
fn test_uint16_tiff_z_range() {
    let data = tiff_bytes(|e| e.write_image::<colortype::Gray16>(3, 1, &[100u16, 2500, 1200]));
    let layer = TiffRaster::from_reader(data, "srtm").expect("decode");
    assert_eq!(layer.band_data_type(1), DataType::UInt16);
    assert!(layer_looks_like_dem(&layer));

    let mut props = ElevationProperties::new(None);
    props.set_enabled(true);
    props.set_z_scale(0.5);
    props.set_z_offset(-10.0);

    let range = props.calculate_z_range(&layer);
    assert_eq!((range.lower, range.upper), (40.0, 1240.0));

    let raw = layer.pixel_value(1, 2, 0).expect("in bounds").expect("valid pixel");
    assert_eq!(props.elevation_for_pixel_value(1, raw), 590.0);
}

#[test]
fn test_in_memory_layer_matches_tiff_layer() {
    let mut layer = InMemoryRaster::new("landsat-f32-b1").with_band(DataType::Float32, vec![0.0]);
    assert!(!layer_looks_like_dem(&layer));
    layer.set_name("Copernicus DEM GLO-30");
    assert!(layer_looks_like_dem(&layer));
}
