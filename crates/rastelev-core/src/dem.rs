//! Heuristic detection of rasters that look like digital elevation models.

use crate::raster::{DataType, RasterSource};
use tracing::trace;

/// Name fragments that hint at elevation data wherever they occur.
///
/// Kept untranslated; localized variants are listed explicitly.
const PARTIAL_NAME_HINTS: &[&str] = &[
    "dem", "height", "elev", "srtm", "dtm", "dsm",
    // French
    "mne", "mnt", "mns", "rge", "alti",
    // German
    "dgm", "hoehe", "höhe",
    // Italian
    "quota",
];

/// Hints that only count as whole words ("aster" must not match "raster").
const WORD_NAME_HINTS: &[&str] = &["aster", "lidar", "alos", "lup", "hydro", "hydrodem"];

/// Returns true if `raster` looks like a DEM.
///
/// A DEM candidate has a single band, no attribute table, an integer or
/// floating point pixel type wide enough to hold heights, and a name that
/// mentions elevation. The structural checks run first, so a matching name
/// never rescues a multi-band or byte raster.
pub fn layer_looks_like_dem(raster: &dyn RasterSource) -> bool {
    if raster.band_count() != 1 {
        trace!("{}: {} bands, not a DEM", raster.name(), raster.band_count());
        return false;
    }

    if raster.attribute_table_count() > 0 {
        trace!("{}: has an attribute table, not a DEM", raster.name());
        return false;
    }

    if !is_elevation_data_type(raster.band_data_type(1)) {
        trace!(
            "{}: data type {} is not elevation-like",
            raster.name(),
            raster.band_data_type(1)
        );
        return false;
    }

    name_suggests_dem(raster.name())
}

/// Whether a band of this type could plausibly hold elevations.
pub fn is_elevation_data_type(data_type: DataType) -> bool {
    match data_type {
        DataType::Int8
        | DataType::UInt16
        | DataType::Int16
        | DataType::UInt32
        | DataType::Int32
        | DataType::Float32
        | DataType::Float64 => true,
        DataType::Unknown
        | DataType::Byte
        | DataType::CInt16
        | DataType::CInt32
        | DataType::CFloat32
        | DataType::CFloat64
        | DataType::Argb32
        | DataType::Argb32Premultiplied => false,
    }
}

/// Case-insensitive check of a layer name for DEM wording.
pub fn name_suggests_dem(name: &str) -> bool {
    let name = name.to_lowercase();
    PARTIAL_NAME_HINTS.iter().any(|hint| name.contains(hint))
        || WORD_NAME_HINTS.iter().any(|hint| contains_word(&name, hint))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::InMemoryRaster;

    fn single_band(name: &str, data_type: DataType) -> InMemoryRaster {
        InMemoryRaster::new(name).with_band(data_type, vec![1.0, 2.0, 3.0])
    }

    #[test]
    fn test_multi_band_is_not_dem() {
        let raster = InMemoryRaster::new("i am a dem")
            .with_band(DataType::Float32, vec![])
            .with_band(DataType::Float32, vec![])
            .with_band(DataType::Float32, vec![]);
        assert!(!layer_looks_like_dem(&raster));
    }

    #[test]
    fn test_empty_raster_is_not_dem() {
        assert!(!layer_looks_like_dem(&InMemoryRaster::new("dem")));
    }

    #[test]
    fn test_byte_band_is_not_dem() {
        assert!(!layer_looks_like_dem(&single_band("dem", DataType::Byte)));
        assert!(!layer_looks_like_dem(&single_band("dem", DataType::CFloat32)));
        assert!(!layer_looks_like_dem(&single_band("dem", DataType::Argb32)));
        assert!(!layer_looks_like_dem(&single_band("dem", DataType::Unknown)));
    }

    #[test]
    fn test_attribute_table_is_not_dem() {
        let raster = single_band("srtm", DataType::Int16).with_attribute_table();
        assert!(!layer_looks_like_dem(&raster));
    }

    #[test]
    fn test_name_hints() {
        let mut raster = single_band("my layer", DataType::Float32);
        assert!(!layer_looks_like_dem(&raster));

        raster.set_name("i am a DEM");
        assert!(layer_looks_like_dem(&raster));

        raster.set_name("i am a raster");
        assert!(!layer_looks_like_dem(&raster));

        raster.set_name("i am a aster satellite layer");
        assert!(layer_looks_like_dem(&raster));
    }

    #[test]
    fn test_integer_types_accepted() {
        for data_type in [
            DataType::Int8,
            DataType::UInt16,
            DataType::Int16,
            DataType::UInt32,
            DataType::Int32,
            DataType::Float64,
        ] {
            assert!(
                layer_looks_like_dem(&single_band("srtm_n47", data_type)),
                "{data_type}"
            );
        }
    }

    #[test]
    fn test_localized_and_word_hints() {
        assert!(name_suggests_dem("Höhenmodell"));
        assert!(name_suggests_dem("DGM1_Bayern"));
        assert!(name_suggests_dem("MNT 25m"));
        assert!(name_suggests_dem("Elevation"));
        assert!(name_suggests_dem("ALOS World 3D"));
        assert!(name_suggests_dem("project lidar 2019"));
        assert!(!name_suggests_dem("project_lidar"));
        assert!(!name_suggests_dem("lidarscan"));
        assert!(!name_suggests_dem("disaster zones"));
        assert!(!name_suggests_dem("landsat"));
    }

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("aster", "aster"));
        assert!(contains_word("an aster.", "aster"));
        assert!(contains_word("raster aster", "aster"));
        assert!(!contains_word("raster", "aster"));
        assert!(!contains_word("asteroid", "aster"));
    }
}
