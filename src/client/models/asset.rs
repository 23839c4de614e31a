//! Exchange asset models

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Catalog entries are not schema-checked: a field of an unexpected type
// degrades to a neutral value instead of failing the whole page.

/// Strings as-is, `null` as empty, anything else as its JSON text.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Strings as `Some`, anything else as `None`.
fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Known labels map to their variant; non-string values become
/// [`Classifier::Other`] holding their JSON text.
fn lenient_classifier<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Classifier>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(Classifier::from(s)),
        other => Some(Classifier::Other(other.to_string())),
    })
}

/// Arrays keep every entry that is an object; anything else is no files.
fn lenient_files<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FileVariant>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// REST API asset as returned by the Exchange asset search.
///
/// Only the fields the exporter needs are modeled; anything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Business group (organization) that owns the asset
    #[serde(default, deserialize_with = "lenient_string")]
    pub group_id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub asset_id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,

    /// Display name (optional)
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Downloadable file variants, in catalog order
    #[serde(default, deserialize_with = "lenient_files")]
    pub files: Vec<FileVariant>,
}

impl Asset {
    /// Coordinates identifying this asset version
    pub fn coordinates(&self) -> AssetCoordinates {
        AssetCoordinates {
            group_id: self.group_id.clone(),
            asset_id: self.asset_id.clone(),
            version: self.version.clone(),
        }
    }
}

/// Group/asset/version triple addressing one asset version in Exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCoordinates {
    pub group_id: String,
    pub asset_id: String,
    pub version: String,
}

impl fmt::Display for AssetCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.group_id, self.asset_id, self.version)
    }
}

/// One downloadable file attached to an asset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVariant {
    #[serde(
        default,
        deserialize_with = "lenient_classifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub classifier: Option<Classifier>,

    /// Signed download URL
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_link: Option<String>,

    /// Packaging (usually `zip`)
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub packaging: Option<String>,
}

impl FileVariant {
    /// Whether the exporter downloads this variant
    pub fn is_supported(&self) -> bool {
        self.classifier.as_ref().is_some_and(Classifier::is_supported)
    }

    /// Classifier label for messages, `None` when absent
    pub fn classifier_label(&self) -> &str {
        self.classifier.as_ref().map_or("None", Classifier::as_str)
    }
}

/// Role of a file variant within an asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classifier {
    /// Generic REST API specification bundle
    RestApi,
    /// RAML specification
    Raml,
    /// OpenAPI specification
    Oas,
    /// Anything else (fat-raml, wsdl, docs, ...)
    Other(String),
}

impl Classifier {
    /// Classifiers the exporter downloads
    pub const SUPPORTED: [Classifier; 3] = [Classifier::RestApi, Classifier::Raml, Classifier::Oas];

    pub fn as_str(&self) -> &str {
        match self {
            Classifier::RestApi => "rest-api",
            Classifier::Raml => "raml",
            Classifier::Oas => "oas",
            Classifier::Other(value) => value,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Classifier::Other(_))
    }
}

impl From<&str> for Classifier {
    fn from(value: &str) -> Self {
        match value {
            "rest-api" => Classifier::RestApi,
            "raml" => Classifier::Raml,
            "oas" => Classifier::Oas,
            other => Classifier::Other(other.to_string()),
        }
    }
}

impl From<String> for Classifier {
    fn from(value: String) -> Self {
        Classifier::from(value.as_str())
    }
}

impl From<Classifier> for String {
    fn from(value: Classifier) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
