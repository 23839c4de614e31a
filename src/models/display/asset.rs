//! Exchange asset display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Asset;

/// Asset display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AssetDisplay {
    #[tabled(rename = "GROUP ID")]
    pub group_id: String,

    #[tabled(rename = "ASSET ID")]
    pub asset_id: String,

    #[tabled(rename = "VERSION")]
    pub version: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Classifiers of the listed file variants, comma separated
    #[tabled(rename = "FILES")]
    pub files: String,
}

impl From<&Asset> for AssetDisplay {
    fn from(asset: &Asset) -> Self {
        let files = if asset.files.is_empty() {
            "-".to_string()
        } else {
            asset
                .files
                .iter()
                .map(|f| f.classifier_label())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            group_id: asset.group_id.clone(),
            asset_id: asset.asset_id.clone(),
            version: asset.version.clone(),
            name: asset.name.clone().unwrap_or_default(),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> Asset {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_asset_display_lists_classifiers() {
        let asset = parse(serde_json::json!({
            "groupId": "org-1",
            "assetId": "orders-api",
            "version": "1.0.2",
            "name": "Orders API",
            "files": [
                {"classifier": "raml", "externalLink": "https://x/raml.zip"},
                {"classifier": "wsdl"},
                {"classifier": null}
            ]
        }));

        let display = AssetDisplay::from(&asset);

        assert_eq!(display.group_id, "org-1");
        assert_eq!(display.asset_id, "orders-api");
        assert_eq!(display.version, "1.0.2");
        assert_eq!(display.name, "Orders API");
        assert_eq!(display.files, "raml, wsdl, None");
    }

    #[test]
    fn test_asset_display_without_files() {
        let asset = parse(serde_json::json!({
            "groupId": "org-1",
            "assetId": "empty-api",
            "version": "0.1.0"
        }));

        let display = AssetDisplay::from(&asset);

        assert_eq!(display.name, "");
        assert_eq!(display.files, "-");
    }
}
