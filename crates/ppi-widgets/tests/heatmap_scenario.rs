//! End-to-end heatmap scenario: two regions, average-price metric, the
//! default five-stop palette, and tooltip placement over a hovered marker.

use ppi_core::color::DEFAULT_PALETTE;
use ppi_core::model::PricingRegion;
use ppi_core::stats::HeatmapMetric;
use ppi_widgets::StatefulWidget;
use ppi_widgets::heatmap::{HeatmapState, PriceHeatmap};
use ppi_widgets::surface::{Style, Surface};
use ppi_widgets::tooltip::Tooltip;

fn region(code: &str, coord: (f64, f64), avg: f64, vendors: u32) -> PricingRegion {
    PricingRegion {
        id: format!("r-{code}"),
        region_code: code.into(),
        coordinate: coord,
        avg_price: avg,
        min_price: avg * 0.8,
        max_price: avg * 1.2,
        vendor_count: vendors,
        sku_count: 25,
        price_index: 1.0,
    }
}

#[test]
fn two_region_scenario_colors_the_extremes() {
    // CA at $3.50 and TX at $1.90: the derived domain is [1.90, 3.50],
    // so CA takes the hottest palette entry and TX the coolest.
    let regions = vec![
        region("CA", (36.7, -119.4), 3.50, 12),
        region("TX", (31.0, -99.9), 1.90, 8),
    ];
    let heatmap = PriceHeatmap::new(&regions).metric(HeatmapMetric::AveragePrice);
    assert_eq!(heatmap.domain(), (1.90, 3.50));

    let mut surface = Surface::new(40, 14);
    let mut state = HeatmapState::default();
    heatmap.render(surface.area(), &mut surface, &mut state);

    // Find each marker through the hit registry and check its color.
    let mut colors = [None, None];
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if let Some(index) = state.hit(x, y) {
                colors[index] = surface.get(x, y).map(|c| c.style.fg);
            }
        }
    }
    assert_eq!(colors[0].flatten(), Some(DEFAULT_PALETTE[4]));
    assert_eq!(colors[1].flatten(), Some(DEFAULT_PALETTE[0]));
}

#[test]
fn legend_reflects_domain_and_metric() {
    let regions = vec![
        region("CA", (36.7, -119.4), 3.50, 12),
        region("TX", (31.0, -99.9), 1.90, 8),
    ];
    let mut surface = Surface::new(40, 14);
    let mut state = HeatmapState::default();
    PriceHeatmap::new(&regions).render(surface.area(), &mut surface, &mut state);

    let legend = surface.row_text(13);
    assert!(legend.contains("1.90"));
    assert!(legend.contains("3.50"));
    assert!(legend.contains("avg price"));
}

#[test]
fn hover_then_tooltip_stays_in_viewport() {
    let regions = vec![
        region("CA", (36.7, -119.4), 3.50, 12),
        region("TX", (31.0, -99.9), 1.90, 8),
    ];
    let mut surface = Surface::new(40, 14);
    let mut state = HeatmapState::default();
    PriceHeatmap::new(&regions).render(surface.area(), &mut surface, &mut state);

    // Hover whichever marker the CA region landed on.
    let (marker, index) = {
        let mut found = None;
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if state.hit(x, y) == Some(0) {
                    found = Some(((x, y), 0));
                }
            }
        }
        found.expect("CA marker should be interactive")
    };
    assert_eq!(state.pointer_moved(marker.0, marker.1), Some(index));

    let (x, y) = state.hover.position().unwrap();
    let area = Tooltip::new(x, y)
        .width(16)
        .render_lines(
            surface.area(),
            &mut surface,
            &["CA  $3.50 avg", "12 vendors"],
            Style::default(),
        )
        .expect("tooltip should fit");
    assert!(area.right() <= surface.width());
    assert!(area.bottom() <= surface.height());
}

#[test]
fn labels_can_be_disabled() {
    let regions = vec![region("CA", (36.7, -119.4), 3.50, 12)];
    let mut surface = Surface::new(40, 14);
    let mut state = HeatmapState::default();
    PriceHeatmap::new(&regions)
        .show_labels(false)
        .show_legend(false)
        .render(surface.area(), &mut surface, &mut state);

    let all_text: String = (0..surface.height()).map(|y| surface.row_text(y)).collect();
    assert!(!all_text.contains("CA"));
}
