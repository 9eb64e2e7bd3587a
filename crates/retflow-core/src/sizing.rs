//! Localized garment-size resolution.
//!
//! Shoppers in different markets expect different sizing conventions on the
//! same garment. A country code picks one of four size systems; the product's
//! per-system size set supplies the value, falling back to the EUR size when
//! the localized one is missing. The rendered label always names the system
//! whose value is actually shown.

use serde::{Deserialize, Serialize};

/// Regional sizing convention a shopper expects for a given market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSystem {
    Eur,
    Uk,
    Us,
    Cn,
}

impl SizeSystem {
    /// Classifies an ISO-3166-alpha-2 country code (case-insensitive) into a
    /// size system. Unrecognized codes default to [`SizeSystem::Eur`].
    #[must_use]
    pub fn for_country(country_code: &str) -> Self {
        match country_code.to_ascii_uppercase().as_str() {
            "GB" | "UK" => SizeSystem::Uk,
            "US" | "CA" => SizeSystem::Us,
            "CN" | "JP" | "KR" | "SG" | "HK" | "TW" | "MY" | "TH" | "VN" | "ID" | "PH" => {
                SizeSystem::Cn
            }
            // European markets and everything unrecognized.
            _ => SizeSystem::Eur,
        }
    }

    /// Display tag used in rendered size labels, e.g. `"EU"` in `"50 (EU)"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SizeSystem::Eur => "EU",
            SizeSystem::Uk => "UK",
            SizeSystem::Us => "US",
            SizeSystem::Cn => "CN",
        }
    }
}

/// Optional per-system size strings for one product. Not all systems are
/// populated on every product; empty strings count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSizes {
    #[serde(rename = "sizeEUR", skip_serializing_if = "Option::is_none")]
    pub size_eur: Option<String>,
    #[serde(rename = "sizeUK", skip_serializing_if = "Option::is_none")]
    pub size_uk: Option<String>,
    #[serde(rename = "sizeUS", skip_serializing_if = "Option::is_none")]
    pub size_us: Option<String>,
    #[serde(rename = "sizeCN", skip_serializing_if = "Option::is_none")]
    pub size_cn: Option<String>,
}

impl ProductSizes {
    fn value_for(&self, system: SizeSystem) -> Option<&str> {
        let raw = match system {
            SizeSystem::Eur => self.size_eur.as_deref(),
            SizeSystem::Uk => self.size_uk.as_deref(),
            SizeSystem::Us => self.size_us.as_deref(),
            SizeSystem::Cn => self.size_cn.as_deref(),
        };
        raw.filter(|s| !s.is_empty())
    }
}

/// Renders the display size for a product in the shopper's market.
///
/// Resolves the size system for `country_code`, then formats
/// `"<value> (<label>)"`. When the localized value is missing and the system
/// is not EUR, the EUR value is shown instead and the label reads `(EU)` —
/// the label always reflects the value actually displayed. When no value is
/// available at all the literal `"N/A"` is shown. Never returns an empty
/// string and never fails.
#[must_use]
pub fn size_label(country_code: &str, sizes: &ProductSizes) -> String {
    let system = SizeSystem::for_country(country_code);
    let localized = sizes.value_for(system);

    if localized.is_none() && system != SizeSystem::Eur {
        let fallback = sizes.value_for(SizeSystem::Eur).unwrap_or("N/A");
        return format!("{} ({})", fallback, SizeSystem::Eur.label());
    }

    format!("{} ({})", localized.unwrap_or("N/A"), system.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(eur: Option<&str>, uk: Option<&str>, us: Option<&str>, cn: Option<&str>) -> ProductSizes {
        ProductSizes {
            size_eur: eur.map(String::from),
            size_uk: uk.map(String::from),
            size_us: us.map(String::from),
            size_cn: cn.map(String::from),
        }
    }

    #[test]
    fn for_country_classifies_each_system() {
        assert_eq!(SizeSystem::for_country("ES"), SizeSystem::Eur);
        assert_eq!(SizeSystem::for_country("DE"), SizeSystem::Eur);
        assert_eq!(SizeSystem::for_country("GB"), SizeSystem::Uk);
        assert_eq!(SizeSystem::for_country("UK"), SizeSystem::Uk);
        assert_eq!(SizeSystem::for_country("US"), SizeSystem::Us);
        assert_eq!(SizeSystem::for_country("CA"), SizeSystem::Us);
        assert_eq!(SizeSystem::for_country("CN"), SizeSystem::Cn);
        assert_eq!(SizeSystem::for_country("JP"), SizeSystem::Cn);
    }

    #[test]
    fn for_country_is_case_insensitive() {
        assert_eq!(SizeSystem::for_country("gb"), SizeSystem::Uk);
        assert_eq!(SizeSystem::for_country("jp"), SizeSystem::Cn);
    }

    #[test]
    fn for_country_unknown_defaults_to_eur() {
        assert_eq!(SizeSystem::for_country("ZZ"), SizeSystem::Eur);
        assert_eq!(SizeSystem::for_country(""), SizeSystem::Eur);
    }

    #[test]
    fn size_label_uses_localized_value() {
        assert_eq!(
            size_label("GB", &sizes(Some("52"), Some("42"), None, None)),
            "42 (UK)"
        );
    }

    #[test]
    fn size_label_falls_back_to_eur_with_eu_tag() {
        // No UK size available: the EUR value is shown and the label must say so.
        assert_eq!(size_label("GB", &sizes(Some("52"), None, None, None)), "52 (EU)");
    }

    #[test]
    fn size_label_unrecognized_country_uses_eur() {
        assert_eq!(size_label("ZZ", &sizes(Some("50"), None, None, None)), "50 (EU)");
    }

    #[test]
    fn size_label_empty_size_set_renders_na() {
        assert_eq!(size_label("US", &ProductSizes::default()), "N/A (EU)");
        assert_eq!(size_label("ES", &ProductSizes::default()), "N/A (EU)");
    }

    #[test]
    fn size_label_treats_empty_string_as_absent() {
        assert_eq!(
            size_label("US", &sizes(Some("50"), None, Some(""), None)),
            "50 (EU)"
        );
    }

    #[test]
    fn product_sizes_deserializes_wire_field_names() {
        let parsed: ProductSizes =
            serde_json::from_str(r#"{"sizeEUR":"50","sizeUK":"40"}"#).expect("parse");
        assert_eq!(parsed.size_eur.as_deref(), Some("50"));
        assert_eq!(parsed.size_uk.as_deref(), Some("40"));
        assert!(parsed.size_us.is_none());
    }
}
