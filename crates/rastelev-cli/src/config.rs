//! Loading and saving elevation properties files.
//!
//! Properties are stored either as YAML (field names as in the serde model)
//! or as the `<elevation>` XML element written by the library. The format is
//! picked from the file extension.

use crate::{CliError, Result};
use rastelev_core::ElevationProperties;
use std::path::Path;
use tracing::debug;

/// On-disk format of a properties file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesFormat {
    /// YAML document (`.yaml` / `.yml`).
    Yaml,
    /// XML element (`.xml`).
    Xml,
}

impl PropertiesFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(PropertiesFormat::Yaml),
            Some("xml") => Ok(PropertiesFormat::Xml),
            _ => Err(CliError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse properties from text in the given format.
///
/// `origin` names the source in error messages.
pub fn parse_properties(text: &str, format: PropertiesFormat, origin: &str) -> Result<ElevationProperties> {
    let props = match format {
        PropertiesFormat::Yaml => serde_yaml::from_str(text)?,
        PropertiesFormat::Xml => {
            let mut props = ElevationProperties::new(None);
            if !props.read_xml_str(text)? {
                return Err(CliError::MissingElevationElement(origin.to_string()));
            }
            props
        }
    };
    Ok(props)
}

/// Render properties as text in the given format.
pub fn render_properties(props: &ElevationProperties, format: PropertiesFormat) -> Result<String> {
    Ok(match format {
        PropertiesFormat::Yaml => serde_yaml::to_string(props)?,
        PropertiesFormat::Xml => format!("{}\n", props.to_xml_string()),
    })
}

/// Load properties from a `.yaml`, `.yml` or `.xml` file.
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<ElevationProperties> {
    let path = path.as_ref();
    let format = PropertiesFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    debug!("Loading {:?} properties from {}", format, path.display());
    parse_properties(&text, format, &path.display().to_string())
}

/// Save properties to a file, choosing the format from its extension.
pub fn save_properties<P: AsRef<Path>>(props: &ElevationProperties, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = PropertiesFormat::from_path(path)?;
    std::fs::write(path, render_properties(props, format)?)?;
    debug!("Wrote {:?} properties to {}", format, path.display());
    Ok(())
}
