#![forbid(unsafe_code)]

//! Geographic price heatmap.
//!
//! Plots each [`PricingRegion`] at its projected coordinate, colored by
//! the active metric through the discrete [`ColorScale`] and sized by
//! vendor count. Regions without data render dimmed and are excluded from
//! hit-testing entirely: no hover, no click, no focus.

use ppi_core::color::ColorScale;
use ppi_core::interaction::HoverState;
use ppi_core::model::PricingRegion;
use ppi_core::stats::{DomainOverride, HeatmapMetric, metric_domain};

use crate::surface::{Rect, Style, Surface};
use crate::StatefulWidget;

/// Marker glyph threshold: regions at or above this many vendors draw the
/// large marker.
const LARGE_MARKER_VENDORS: u32 = 10;

/// The heatmap widget. Borrowed data, builder-style configuration.
#[derive(Debug, Clone)]
pub struct PriceHeatmap<'a> {
    regions: &'a [PricingRegion],
    metric: HeatmapMetric,
    bounds: DomainOverride,
    scale: ColorScale,
    show_labels: bool,
    show_legend: bool,
}

impl<'a> PriceHeatmap<'a> {
    pub fn new(regions: &'a [PricingRegion]) -> Self {
        Self {
            regions,
            metric: HeatmapMetric::AveragePrice,
            bounds: DomainOverride::default(),
            scale: ColorScale::default(),
            show_labels: true,
            show_legend: true,
        }
    }

    #[must_use]
    pub fn metric(mut self, metric: HeatmapMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Caller-supplied domain overrides, field by field.
    #[must_use]
    pub fn bounds(mut self, bounds: DomainOverride) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: ColorScale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    #[must_use]
    pub fn show_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// The domain this render would use, exposed for legends and tests.
    pub fn domain(&self) -> (f64, f64) {
        metric_domain(self.regions, self.metric, self.bounds)
    }
}

/// Hover/selection state plus the hit registry rebuilt on every render.
#[derive(Debug, Default)]
pub struct HeatmapState {
    pub hover: HoverState<usize>,
    pub selected: Option<usize>,
    hits: Vec<(Rect, usize)>,
}

impl HeatmapState {
    /// The interactive region under `(x, y)`, if any.
    pub fn hit(&self, x: u16, y: u16) -> Option<usize> {
        self.hits
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|&(_, index)| index)
    }

    /// Route a pointer move: enters/leaves hover accordingly and returns
    /// the hovered region index for the host's region-hover callback.
    pub fn pointer_moved(&mut self, x: u16, y: u16) -> Option<usize> {
        match self.hit(x, y) {
            Some(index) => {
                self.hover.pointer_enter(index, x, y);
                Some(index)
            }
            None => {
                self.hover.pointer_leave();
                None
            }
        }
    }

    pub fn pointer_left(&mut self) {
        self.hover.pointer_leave();
    }

    /// Resolve a click to a region index for the host's region-click
    /// callback. Clicks never change hover state.
    pub fn click(&self, x: u16, y: u16) -> Option<usize> {
        self.hit(x, y)
    }
}

fn project(value: f64, min: f64, max: f64, extent: u16) -> u16 {
    if extent <= 1 || max <= min {
        return extent / 2;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    (t * f64::from(extent - 1)).round() as u16
}

impl StatefulWidget for PriceHeatmap<'_> {
    type State = HeatmapState;

    fn render(&self, area: Rect, surface: &mut Surface, state: &mut HeatmapState) {
        state.hits.clear();
        if area.is_empty() {
            return;
        }

        let legend_rows = u16::from(self.show_legend && area.height > 2);
        let plot = Rect::new(area.x, area.y, area.width, area.height - legend_rows);
        if plot.is_empty() {
            return;
        }

        // Geographic extents over all regions, data or not, so markers
        // keep their relative positions when some regions are empty.
        let mut lat = (f64::INFINITY, f64::NEG_INFINITY);
        let mut lon = (f64::INFINITY, f64::NEG_INFINITY);
        for region in self.regions {
            lat = (lat.0.min(region.coordinate.0), lat.1.max(region.coordinate.0));
            lon = (lon.0.min(region.coordinate.1), lon.1.max(region.coordinate.1));
        }

        let (min, max) = self.domain();
        tracing::trace!(regions = self.regions.len(), min, max, "rendering heatmap");
        for (index, region) in self.regions.iter().enumerate() {
            let col = plot.x + project(region.coordinate.1, lon.0, lon.1, plot.width);
            // Latitude grows northward, rows grow downward.
            let row = plot.y + plot.height - 1
                - project(region.coordinate.0, lat.0, lat.1, plot.height);

            if region.has_data() {
                let color = self.scale.color_for(self.metric.value(region), min, max);
                let glyph = if region.vendor_count >= LARGE_MARKER_VENDORS {
                    '●'
                } else {
                    '•'
                };
                let mut style = Style::new().fg(color);
                if state.selected == Some(index) {
                    style = style.bold();
                }
                surface.set(col, row, glyph, style);
                state.hits.push((Rect::new(col, row, 1, 1), index));

                if self.show_labels {
                    let label_x = col + 2;
                    if label_x < plot.right() {
                        surface.set_str_n(
                            label_x,
                            row,
                            &region.region_code,
                            plot.right() - label_x,
                            style,
                        );
                    }
                }
            } else {
                // No pricing: visually distinct, never interactive.
                surface.set(col, row, '·', Style::new().dim());
            }
        }

        if legend_rows > 0 {
            self.render_legend(area, surface, min, max);
        }
    }
}

impl PriceHeatmap<'_> {
    fn render_legend(&self, area: Rect, surface: &mut Surface, min: f64, max: f64) {
        let y = area.bottom() - 1;
        let mut x =
            surface.set_str_n(area.x, y, &format!("{:.2} ", min), area.width, Style::new().dim());
        for &stop in self.scale.stops() {
            if x >= area.right() {
                return;
            }
            surface.set(x, y, '■', Style::new().fg(stop));
            x += 1;
        }
        surface.set_str_n(
            x,
            y,
            &format!(" {:.2} ({})", max, self.metric.label()),
            area.right().saturating_sub(x),
            Style::new().dim(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(code: &str, coord: (f64, f64), avg: f64, vendors: u32) -> PricingRegion {
        PricingRegion {
            id: format!("r-{code}"),
            region_code: code.into(),
            coordinate: coord,
            avg_price: avg,
            min_price: avg * 0.8,
            max_price: avg * 1.2,
            vendor_count: vendors,
            sku_count: 10,
            price_index: 1.0,
        }
    }

    #[test]
    fn empty_collection_uses_fallback_domain() {
        let heatmap = PriceHeatmap::new(&[]);
        assert_eq!(heatmap.domain(), (0.0, 100.0));
        // Rendering an empty collection is a no-op, not an error.
        let mut surface = Surface::new(20, 10);
        let mut state = HeatmapState::default();
        heatmap.render(surface.area(), &mut surface, &mut state);
        assert_eq!(state.hit(5, 5), None);
    }

    #[test]
    fn dataless_region_is_not_interactive() {
        let regions = vec![
            region("CA", (36.7, -119.4), 3.5, 12),
            region("NV", (38.8, -116.4), 0.0, 0),
        ];
        let mut surface = Surface::new(30, 12);
        let mut state = HeatmapState::default();
        PriceHeatmap::new(&regions).render(surface.area(), &mut surface, &mut state);

        let interactive: Vec<usize> = state.hits.iter().map(|&(_, i)| i).collect();
        assert_eq!(interactive, vec![0]);
    }

    #[test]
    fn sub_rect_render_never_bleeds_past_the_area() {
        // A long label near the right edge and a legend wider than the
        // area must clip at the widget boundary, not the surface edge.
        let regions = vec![region("CALIFORNIA-CENTRAL", (36.7, -119.4), 3.5, 12)];
        let mut surface = Surface::new(40, 12);
        let mut state = HeatmapState::default();
        let area = Rect::new(0, 0, 20, 12);
        PriceHeatmap::new(&regions).render(area, &mut surface, &mut state);

        for y in 0..12 {
            for x in 20..40 {
                assert_eq!(surface.get(x, y).unwrap().ch, ' ', "bled at ({x}, {y})");
            }
        }
    }

    #[test]
    fn pointer_move_over_marker_shows_hover() {
        let regions = vec![region("CA", (36.7, -119.4), 3.5, 12)];
        let mut surface = Surface::new(30, 12);
        let mut state = HeatmapState::default();
        PriceHeatmap::new(&regions).render(surface.area(), &mut surface, &mut state);

        let (marker, index) = state.hits[0];
        assert_eq!(state.pointer_moved(marker.x, marker.y), Some(index));
        assert!(state.hover.is_shown());
        assert_eq!(state.hover.position(), Some((marker.x, marker.y)));

        state.pointer_moved(marker.x + 5, marker.y + 3);
        assert!(!state.hover.is_shown());
    }
}
