#![forbid(unsafe_code)]

//! Inbound data contracts.
//!
//! Every type here is supplied by the hosting application and treated as
//! immutable within a render cycle. The view layer derives presentation
//! values from these shapes but never mutates their canonical form.

use serde::{Deserialize, Serialize};

/// Aggregate pricing statistics for one geographic region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRegion {
    pub id: String,
    /// Short geographic code, e.g. `"CA"` or a ZIP prefix.
    pub region_code: String,
    /// (latitude, longitude) of the region's display anchor.
    pub coordinate: (f64, f64),
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub vendor_count: u32,
    pub sku_count: u32,
    /// Normalized price index where 1.0 is the national average.
    pub price_index: f64,
}

impl PricingRegion {
    /// Whether this region carries any pricing observations.
    ///
    /// Regions without data render dimmed and are excluded from hover,
    /// click, and keyboard focus.
    pub fn has_data(&self) -> bool {
        self.vendor_count > 0
    }
}

/// Vendor taxonomy carried by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    Distributor,
    Manufacturer,
    Retailer,
}

/// One supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub kind: VendorKind,
    /// Reliability on a 0..=1 scale, when the backend has scored it.
    pub reliability_score: Option<f64>,
    pub avg_lead_time_days: Option<u32>,
}

/// One product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: String,
    pub product_name: String,
    pub category: String,
    /// Pricing unit, e.g. `"sqft"`.
    pub unit: String,
    /// Descriptive attribute pairs, display-only.
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
}

/// Pairing of one [`Vendor`] and one [`Sku`] in the coverage matrix.
///
/// `rank` is assigned by the backend: 1 is cheapest among the priced cells
/// for that SKU, and ranks are dense. The view layer treats ranks as opaque
/// ordinals and makes no assumption about tie order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub vendor_id: String,
    pub sku_id: String,
    /// `None` means this vendor does not price this SKU.
    pub price: Option<f64>,
    pub rank: Option<u32>,
    #[serde(default)]
    pub primary_supplier: bool,
}

impl MatrixCell {
    pub fn has_pricing(&self) -> bool {
        self.price.is_some()
    }

    pub fn is_best_price(&self) -> bool {
        self.price.is_some() && self.rank == Some(1)
    }
}

/// Calibration view state.
///
/// `slider_value` is user-authoritative: it reflects the latest drag and is
/// never overwritten by a server response. All other fields are replaced
/// wholesale when the most recent inference request completes successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationState {
    pub slider_value: f64,
    pub ai_recommended_value: f64,
    /// (lower, upper), lower <= upper.
    pub confidence_interval: (f64, f64),
    pub projected_lift: f64,
    pub calibration_score: f64,
    pub last_latency_ms: f64,
}

/// Promotion type, selecting the slider domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromoKind {
    Percentage,
    Volume,
}

/// Value domain and step for one promotion type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromoDomain {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl PromoKind {
    /// The slider domain for this promotion type.
    pub const fn domain(self) -> PromoDomain {
        match self {
            Self::Percentage => PromoDomain {
                min: 0.0,
                max: 50.0,
                step: 1.0,
            },
            Self::Volume => PromoDomain {
                min: 0.0,
                max: 500.0,
                step: 10.0,
            },
        }
    }

    /// Wire name used by the inference endpoint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Volume => "volume",
        }
    }
}

/// Partial search criteria. `None` on any field means "no constraint",
/// which is distinct from an empty-string constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub supplier: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub active_only: Option<bool>,
}

impl SearchFilters {
    /// True when no field constrains the search.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.category.is_none()
            && self.region.is_none()
            && self.supplier.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.active_only.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promo_domains_match_promotion_type() {
        let pct = PromoKind::Percentage.domain();
        assert_eq!((pct.min, pct.max, pct.step), (0.0, 50.0, 1.0));

        let vol = PromoKind::Volume.domain();
        assert_eq!((vol.min, vol.max, vol.step), (0.0, 500.0, 10.0));
    }

    #[test]
    fn promo_kind_wire_names() {
        assert_eq!(PromoKind::Percentage.as_str(), "percentage");
        assert_eq!(PromoKind::Volume.as_str(), "volume");
    }

    #[test]
    fn empty_filters_report_empty() {
        let mut filters = SearchFilters::default();
        assert!(filters.is_empty());
        filters.query = Some(String::new());
        assert!(!filters.is_empty());
    }

    #[test]
    fn region_without_vendors_has_no_data() {
        let region = PricingRegion {
            id: "r1".into(),
            region_code: "CA".into(),
            coordinate: (36.7, -119.4),
            avg_price: 0.0,
            min_price: 0.0,
            max_price: 0.0,
            vendor_count: 0,
            sku_count: 0,
            price_index: 0.0,
        };
        assert!(!region.has_data());
    }

    #[test]
    fn vendor_kind_serializes_lowercase() {
        let json = serde_json::to_string(&VendorKind::Distributor).unwrap();
        assert_eq!(json, "\"distributor\"");
    }
}
