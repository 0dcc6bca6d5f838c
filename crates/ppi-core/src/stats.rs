#![forbid(unsafe_code)]

//! Derived statistics over the inbound collections.
//!
//! Everything here is recomputed from the full input on demand; there is no
//! incremental path. Callers that want memoization hold the derived value
//! while the inputs are referentially unchanged.

use crate::model::{MatrixCell, PricingRegion, Sku, Vendor};

/// Fallback domain when a metric has no observations.
pub const FALLBACK_DOMAIN: (f64, f64) = (0.0, 100.0);

/// The heatmap metric being visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatmapMetric {
    AveragePrice,
    VendorCount,
    PriceIndex,
}

impl HeatmapMetric {
    /// Extract this metric's value from a region.
    pub fn value(self, region: &PricingRegion) -> f64 {
        match self {
            Self::AveragePrice => region.avg_price,
            Self::VendorCount => f64::from(region.vendor_count),
            Self::PriceIndex => region.price_index,
        }
    }

    /// Short display label for legends.
    pub fn label(self) -> &'static str {
        match self {
            Self::AveragePrice => "avg price",
            Self::VendorCount => "vendors",
            Self::PriceIndex => "price index",
        }
    }
}

/// Caller-supplied domain overrides. A `Some` bound wins over the computed
/// one, field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DomainOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Compute the `[min, max]` domain for a metric across the regions.
///
/// Empty input falls back to [`FALLBACK_DOMAIN`] instead of failing;
/// override bounds are applied on top either way.
pub fn metric_domain(
    regions: &[PricingRegion],
    metric: HeatmapMetric,
    bounds: DomainOverride,
) -> (f64, f64) {
    let computed = regions
        .iter()
        .map(|r| metric.value(r))
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or(FALLBACK_DOMAIN);
    (
        bounds.min.unwrap_or(computed.0),
        bounds.max.unwrap_or(computed.1),
    )
}

/// Per-vendor coverage aggregates over the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorAggregate {
    pub vendor_id: String,
    /// Cells with pricing for this vendor.
    pub priced_count: u32,
    /// `priced_count / total SKUs * 100`; zero when there are no SKUs.
    pub coverage_pct: f64,
    /// Cells where this vendor holds rank 1.
    pub best_price_count: u32,
}

/// Recompute per-vendor aggregates from the full matrix.
///
/// The result is parallel to `vendors` (insertion order preserved). Cells
/// referencing unknown vendors are ignored.
pub fn vendor_aggregates(
    vendors: &[Vendor],
    skus: &[Sku],
    cells: &[MatrixCell],
) -> Vec<VendorAggregate> {
    let total_skus = skus.len() as u32;
    vendors
        .iter()
        .map(|vendor| {
            let mut priced = 0u32;
            let mut best = 0u32;
            for cell in cells.iter().filter(|c| c.vendor_id == vendor.id) {
                if cell.has_pricing() {
                    priced += 1;
                }
                if cell.is_best_price() {
                    best += 1;
                }
            }
            let coverage_pct = if total_skus == 0 {
                0.0
            } else {
                f64::from(priced) / f64::from(total_skus) * 100.0
            };
            VendorAggregate {
                vendor_id: vendor.id.clone(),
                priced_count: priced,
                coverage_pct,
                best_price_count: best,
            }
        })
        .collect()
}

/// Per-SKU single-source flags, parallel to `skus`.
///
/// A SKU is single-source when exactly one cell across all vendors prices
/// it: a supply-risk indicator.
pub fn single_source_flags(skus: &[Sku], cells: &[MatrixCell]) -> Vec<bool> {
    skus.iter()
        .map(|sku| {
            cells
                .iter()
                .filter(|c| c.sku_id == sku.id && c.has_pricing())
                .count()
                == 1
        })
        .collect()
}

/// Vendor ordering in the coverage matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VendorSort {
    /// Alphabetical by name, ascending.
    #[default]
    Name,
    /// Descending by priced-cell count.
    Coverage,
    /// Descending by best-price count.
    BestPrice,
}

/// Order vendors for display, returning indices into `vendors`.
///
/// The sort is stable: equal keys keep insertion order. `aggregates` must
/// be the parallel result of [`vendor_aggregates`].
pub fn sort_vendor_indices(
    vendors: &[Vendor],
    aggregates: &[VendorAggregate],
    sort: VendorSort,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..vendors.len()).collect();
    match sort {
        VendorSort::Name => {
            indices.sort_by(|&a, &b| vendors[a].name.cmp(&vendors[b].name));
        }
        VendorSort::Coverage => {
            indices.sort_by(|&a, &b| {
                aggregates[b].priced_count.cmp(&aggregates[a].priced_count)
            });
        }
        VendorSort::BestPrice => {
            indices.sort_by(|&a, &b| {
                aggregates[b]
                    .best_price_count
                    .cmp(&aggregates[a].best_price_count)
            });
        }
    }
    indices
}

/// Aggregate figures for the summary metric cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSummary {
    pub vendor_count: u32,
    pub sku_count: u32,
    /// (min, max) over priced cells; `None` when nothing is priced.
    pub price_range: Option<(f64, f64)>,
    /// Mean over priced cells; `None` when nothing is priced.
    pub market_average: Option<f64>,
}

/// Compute the summary card figures from the matrix.
pub fn market_summary(vendors: &[Vendor], skus: &[Sku], cells: &[MatrixCell]) -> MarketSummary {
    let mut range: Option<(f64, f64)> = None;
    let mut sum = 0.0;
    let mut priced = 0u32;
    for price in cells.iter().filter_map(|c| c.price) {
        range = Some(match range {
            None => (price, price),
            Some((lo, hi)) => (lo.min(price), hi.max(price)),
        });
        sum += price;
        priced += 1;
    }
    MarketSummary {
        vendor_count: vendors.len() as u32,
        sku_count: skus.len() as u32,
        price_range: range,
        market_average: (priced > 0).then(|| sum / f64::from(priced)),
    }
}

/// Signed deviation of one region's average price from the national mean.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalDelta {
    pub region_code: String,
    pub avg_price: f64,
    /// `avg_price - national average`; negative reads as cheaper.
    pub delta: f64,
}

/// Per-region deltas against the mean average price of the supplied set.
///
/// Empty input yields an empty vector.
pub fn regional_deltas(regions: &[PricingRegion]) -> Vec<RegionalDelta> {
    if regions.is_empty() {
        return Vec::new();
    }
    let national = regions.iter().map(|r| r.avg_price).sum::<f64>() / regions.len() as f64;
    regions
        .iter()
        .map(|r| RegionalDelta {
            region_code: r.region_code.clone(),
            avg_price: r.avg_price,
            delta: r.avg_price - national,
        })
        .collect()
}
