//! Registry of the hosted map styles and their variants.

use crate::{ClientConfig, ClientError};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapStyleVariant {
    /// Style id used in URLs, e.g. `streets-v2-dark`.
    pub id: &'static str,
    pub name: &'static str,
    /// Variant kind, e.g. `DEFAULT`, `DARK`, `PASTEL`.
    pub variant_type: &'static str,
}

impl MapStyleVariant {
    /// Returns the URL of this variant's style document.
    pub fn style_url(&self, config: &ClientConfig) -> Result<Url, ClientError> {
        config.endpoint(&["maps", self.id, "style.json"])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapStyle {
    /// Family reference, e.g. `STREETS`.
    pub reference: &'static str,
    /// Id of the default variant.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    default: MapStyleVariant,
    others: &'static [MapStyleVariant],
}

impl MapStyle {
    pub fn default_variant(&self) -> &MapStyleVariant {
        &self.default
    }

    /// Returns the variant of kind `variant_type` (case insensitive),
    /// or the default variant when this style has no such kind.
    pub fn variant(&self, variant_type: &str) -> &MapStyleVariant {
        self.others
            .iter()
            .find(|v| v.variant_type.eq_ignore_ascii_case(variant_type))
            .unwrap_or(&self.default)
    }

    pub fn has_variant(&self, variant_type: &str) -> bool {
        self.variants()
            .any(|v| v.variant_type.eq_ignore_ascii_case(variant_type))
    }

    /// Iterates over all variants, default first.
    pub fn variants(&self) -> impl Iterator<Item = &MapStyleVariant> {
        std::iter::once(&self.default).chain(self.others.iter())
    }
}

/// Finds the style family owning `id`.
///
/// `id` may be a family reference (`STREETS`), a default style id
/// (`streets-v2`), or a variant id (`streets-v2-dark`).
pub fn find_style(id: &str) -> Option<&'static MapStyle> {
    MAP_STYLES.iter().find(|style| {
        style.reference.eq_ignore_ascii_case(id) || style.variants().any(|v| v.id == id)
    })
}

/// Finds the exact variant with style id `id`.
pub fn find_variant(id: &str) -> Option<&'static MapStyleVariant> {
    MAP_STYLES
        .iter()
        .flat_map(|style| std::iter::once(&style.default).chain(style.others.iter()))
        .find(|v| v.id == id)
}

macro_rules! variant {
    ($id:literal, $name:literal, $kind:literal) => {
        MapStyleVariant {
            id: $id,
            name: $name,
            variant_type: $kind,
        }
    };
}

macro_rules! style {
    (
        $reference:literal, $id:literal, $name:literal, $description:literal,
        [$(($vid:literal, $vname:literal, $vkind:literal)),* $(,)?]
    ) => {
        MapStyle {
            reference: $reference,
            id: $id,
            name: $name,
            description: $description,
            default: variant!($id, $name, "DEFAULT"),
            others: &[$(variant!($vid, $vname, $vkind)),*],
        }
    };
}

pub static MAP_STYLES: &[MapStyle] = &[
    style!(
        "STREETS", "streets-v2", "Streets",
        "Balanced road map for navigation and general use.",
        [
            ("streets-v2-dark", "Streets Dark", "DARK"),
            ("streets-v2-light", "Streets Light", "LIGHT"),
            ("streets-v2-night", "Streets Night", "NIGHT"),
            ("streets-v2-pastel", "Streets Pastel", "PASTEL"),
        ]
    ),
    style!(
        "OUTDOOR", "outdoor-v2", "Outdoor",
        "Trails, contours, and hillshading for outdoor activities.",
        [("outdoor-v2-dark", "Outdoor Dark", "DARK")]
    ),
    style!(
        "WINTER", "winter-v2", "Winter",
        "Ski slopes, lifts, and winter trails.",
        [("winter-v2-dark", "Winter Dark", "DARK")]
    ),
    style!(
        "SATELLITE", "satellite", "Satellite",
        "Aerial and satellite imagery.",
        []
    ),
    style!(
        "HYBRID", "hybrid", "Hybrid",
        "Satellite imagery with labels and roads.",
        []
    ),
    style!(
        "BASIC", "basic-v2", "Basic",
        "Minimal general purpose map.",
        [
            ("basic-v2-dark", "Basic Dark", "DARK"),
            ("basic-v2-light", "Basic Light", "LIGHT"),
        ]
    ),
    style!(
        "BRIGHT", "bright-v2", "Bright",
        "Colorful general purpose map.",
        [
            ("bright-v2-dark", "Bright Dark", "DARK"),
            ("bright-v2-light", "Bright Light", "LIGHT"),
            ("bright-v2-pastel", "Bright Pastel", "PASTEL"),
        ]
    ),
    style!(
        "OPENSTREETMAP", "openstreetmap", "OpenStreetMap",
        "Classic OpenStreetMap look.",
        []
    ),
    style!(
        "TOPO", "topo-v2", "Topo",
        "Topographic map with contours and relief.",
        [
            ("topo-v2-dark", "Topo Dark", "DARK"),
            ("topo-v2-shiny", "Topo Shiny", "SHINY"),
            ("topo-v2-pastel", "Topo Pastel", "PASTEL"),
            ("topo-v2-topographique", "Topo Topographique", "TOPOGRAPHIQUE"),
        ]
    ),
    style!(
        "VOYAGER", "voyager-v2", "Voyager",
        "Muted basemap for data overlays.",
        [
            ("voyager-v2-dark", "Voyager Dark", "DARK"),
            ("voyager-v2-light", "Voyager Light", "LIGHT"),
            ("voyager-v2-vintage", "Voyager Vintage", "VINTAGE"),
        ]
    ),
    style!(
        "TONER", "toner-v2", "Toner",
        "High contrast black and white map.",
        [
            ("toner-v2-background", "Toner Background", "BACKGROUND"),
            ("toner-v2-lite", "Toner Lite", "LITE"),
            ("toner-v2-lines", "Toner Lines", "LINES"),
        ]
    ),
    style!(
        "DATAVIZ", "dataviz", "Dataviz",
        "Neutral basemap for thematic visualization.",
        [
            ("dataviz-dark", "Dataviz Dark", "DARK"),
            ("dataviz-light", "Dataviz Light", "LIGHT"),
        ]
    ),
    style!(
        "BACKDROP", "backdrop", "Backdrop",
        "Relief and water backdrop without labels.",
        [
            ("backdrop-dark", "Backdrop Dark", "DARK"),
            ("backdrop-light", "Backdrop Light", "LIGHT"),
        ]
    ),
    style!(
        "OCEAN", "ocean", "Ocean",
        "Bathymetry and marine features.",
        []
    ),
];

#[cfg(test)]
mod tests {
    use super::{find_style, find_variant, MAP_STYLES};
    use crate::ClientConfig;
    use std::collections::HashSet;

    #[test]
    fn test_variant_or_default() {
        let streets = find_style("STREETS").unwrap();
        assert_eq!(streets.default_variant().id, "streets-v2");
        assert_eq!(streets.variant("dark").id, "streets-v2-dark");
        assert_eq!(streets.variant("VINTAGE").id, "streets-v2");
        assert!(streets.has_variant("DEFAULT"));
        assert!(!streets.has_variant("VINTAGE"));
        assert_eq!(streets.variants().count(), 5);
    }

    #[test]
    fn test_find_style() {
        assert_eq!(find_style("topo-v2-shiny").unwrap().reference, "TOPO");
        assert_eq!(find_style("satellite").unwrap().name, "Satellite");
        assert_eq!(find_style("ocean").unwrap().variant("DARK").id, "ocean");
        assert!(find_style("nope").is_none());
        assert_eq!(find_variant("toner-v2-lite").unwrap().variant_type, "LITE");
        assert!(find_variant("TONER").is_none());
    }

    #[test]
    fn test_registry_ids_unique() {
        let mut ids = HashSet::new();
        for style in MAP_STYLES {
            assert_eq!(style.id, style.default_variant().id);
            for variant in style.variants() {
                assert!(ids.insert(variant.id), "duplicate id {}", variant.id);
            }
        }
        for family in [
            "streets", "outdoor", "winter", "satellite", "hybrid", "basic", "bright", "topo",
            "voyager", "toner", "dataviz", "ocean",
        ] {
            assert!(find_style(family).is_some(), "missing {family}");
        }
    }

    #[test]
    fn test_style_url() {
        let config = ClientConfig::builder().api_key("k").build().unwrap();
        let url = find_variant("basic-v2-light").unwrap().style_url(&config).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.maptiler.com/maps/basic-v2-light/style.json?key=k"
        );
    }
}
