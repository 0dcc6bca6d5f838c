use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ppi_core::model::{MatrixCell, PricingRegion, Sku, Vendor, VendorKind};
use ppi_core::stats::{DomainOverride, HeatmapMetric, metric_domain, vendor_aggregates};

fn fixture(
    vendor_count: usize,
    sku_count: usize,
) -> (Vec<Vendor>, Vec<Sku>, Vec<MatrixCell>, Vec<PricingRegion>) {
    let vendors: Vec<Vendor> = (0..vendor_count)
        .map(|i| Vendor {
            id: format!("v{i}"),
            name: format!("Vendor {i}"),
            kind: VendorKind::Distributor,
            reliability_score: Some(0.8),
            avg_lead_time_days: Some(7),
        })
        .collect();
    let skus: Vec<Sku> = (0..sku_count)
        .map(|i| Sku {
            id: format!("s{i}"),
            product_name: format!("Product {i}"),
            category: "flooring".into(),
            unit: "sqft".into(),
            attributes: Vec::new(),
        })
        .collect();
    let mut cells = Vec::with_capacity(vendor_count * sku_count);
    for (vi, vendor) in vendors.iter().enumerate() {
        for (si, sku) in skus.iter().enumerate() {
            let priced = (vi + si) % 3 != 0;
            cells.push(MatrixCell {
                vendor_id: vendor.id.clone(),
                sku_id: sku.id.clone(),
                price: priced.then(|| 1.0 + (vi * si) as f64 * 0.01),
                rank: priced.then(|| (vi % 4 + 1) as u32),
                primary_supplier: false,
            });
        }
    }
    let regions: Vec<PricingRegion> = (0..50)
        .map(|i| PricingRegion {
            id: format!("r{i}"),
            region_code: format!("R{i}"),
            coordinate: (30.0 + i as f64 * 0.1, -100.0 + i as f64 * 0.2),
            avg_price: 1.5 + i as f64 * 0.05,
            min_price: 1.0,
            max_price: 5.0,
            vendor_count: (i % 12) as u32,
            sku_count: 20,
            price_index: 0.8 + i as f64 * 0.01,
        })
        .collect();
    (vendors, skus, cells, regions)
}

fn bench_derived_stats(c: &mut Criterion) {
    let (vendors, skus, cells, regions) = fixture(40, 100);

    c.bench_function("vendor_aggregates_40x100", |b| {
        b.iter(|| vendor_aggregates(black_box(&vendors), black_box(&skus), black_box(&cells)))
    });

    c.bench_function("metric_domain_50_regions", |b| {
        b.iter(|| {
            metric_domain(
                black_box(&regions),
                HeatmapMetric::AveragePrice,
                DomainOverride::default(),
            )
        })
    });
}

criterion_group!(benches, bench_derived_stats);
criterion_main!(benches);
