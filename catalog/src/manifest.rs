use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use tileseam_core::{LayerName, SpriteCoord, VariantName};

use crate::{CatalogError, VariantCatalog};

/// Manifest version understood by [`VariantCatalog::from_manifest_str`].
pub const SUPPORTED_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    #[serde(default)]
    default_layer: Option<String>,
    #[serde(default)]
    variants: BTreeMap<String, Vec<[u32; 2]>>,
}

impl VariantCatalog {
    /// Loads a catalog from the TOML manifest at `path`.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_manifest_str(&contents)
    }

    /// Parses a catalog from TOML manifest contents.
    ///
    /// ```toml
    /// version = 1
    /// default_layer = "ground"
    ///
    /// [variants]
    /// m = [[0, 0], [1, 0]]
    /// ttl = [[0, 1]]
    /// ```
    pub fn from_manifest_str(contents: &str) -> Result<Self, CatalogError> {
        let manifest: Manifest = toml::from_str(contents)?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: manifest.version,
                expected: SUPPORTED_MANIFEST_VERSION,
            });
        }

        let mut catalog = Self::new();
        for (name, coords) in manifest.variants {
            let name = VariantName::new(name)?;
            let coords = coords.into_iter().map(SpriteCoord::from).collect();
            let _ = catalog.insert(name, coords)?;
        }
        let default_layer = manifest.default_layer.map(LayerName::new).transpose()?;
        catalog.set_default_layer(default_layer);
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use crate::{CatalogError, VariantCatalog, SUPPORTED_MANIFEST_VERSION};
    use tileseam_core::SpriteCoord;

    #[test]
    fn manifest_lists_coordinates_per_variant() {
        let manifest = r#"
            version = 1
            default_layer = "ground"

            [variants]
            m = [[0, 0], [1, 0], [2, 0]]
            ttl = [[0, 1]]
        "#;

        let catalog = VariantCatalog::from_manifest_str(manifest).expect("manifest should parse");
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.variants("m"),
            Some(
                &[
                    SpriteCoord::new(0, 0),
                    SpriteCoord::new(1, 0),
                    SpriteCoord::new(2, 0)
                ][..]
            )
        );
        assert_eq!(catalog.variants("ttl"), Some(&[SpriteCoord::new(0, 1)][..]));
        assert_eq!(
            catalog.default_layer().map(|layer| layer.as_str()),
            Some("ground")
        );
    }

    #[test]
    fn default_layer_is_optional() {
        let manifest = r#"
            version = 1

            [variants]
            m = [[0, 0]]
        "#;

        let catalog = VariantCatalog::from_manifest_str(manifest).expect("manifest should parse");
        assert!(catalog.default_layer().is_none());
    }

    #[test]
    fn manifest_rejects_unsupported_versions() {
        let manifest = r#"
            version = 2

            [variants]
            m = [[0, 0]]
        "#;

        let result = VariantCatalog::from_manifest_str(manifest);
        assert!(
            matches!(
                result,
                Err(CatalogError::UnsupportedVersion { found: 2, expected })
                    if expected == SUPPORTED_MANIFEST_VERSION
            ),
            "version 2 must be rejected"
        );
    }

    #[test]
    fn manifest_rejects_empty_coordinate_lists() {
        let manifest = r#"
            version = 1

            [variants]
            m = []
        "#;

        let result = VariantCatalog::from_manifest_str(manifest);
        assert!(matches!(result, Err(CatalogError::EmptyVariant(_))));
    }

    #[test]
    fn manifest_rejects_names_that_break_tile_keys() {
        let manifest = r#"
            version = 1

            [variants]
            "m_2" = [[0, 0]]
        "#;

        let result = VariantCatalog::from_manifest_str(manifest);
        assert!(matches!(result, Err(CatalogError::InvalidName(_))));

        let layer = r#"
            version = 1
            default_layer = "deep_water"
        "#;
        assert!(matches!(
            VariantCatalog::from_manifest_str(layer),
            Err(CatalogError::InvalidName(_))
        ));
    }

    #[test]
    fn manifest_rejects_unknown_fields() {
        let manifest = r#"
            version = 1
            sprites = "sheet.png"
        "#;

        let result = VariantCatalog::from_manifest_str(manifest);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn missing_manifest_reports_its_path() {
        let error = VariantCatalog::from_manifest_path("does/not/exist.toml")
            .expect_err("missing file must fail");
        assert!(error.to_string().contains("does/not/exist.toml"), "{error}");
    }
}
