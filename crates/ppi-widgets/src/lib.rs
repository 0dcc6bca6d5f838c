#![forbid(unsafe_code)]

//! Display widgets for the PricePoint dashboard.
//!
//! Four presentational components render derived view-state into a cell
//! [`Surface`]: [`heatmap::PriceHeatmap`], [`matrix::CoverageMatrix`],
//! [`slider::CalibrationSlider`], and [`filter_panel::FilterPanelWidget`],
//! plus the pointer-anchored [`tooltip::Tooltip`]. Widgets own no data:
//! collections are borrowed per render and derived statistics come from
//! `ppi-core`.

pub mod filter_panel;
pub mod heatmap;
pub mod matrix;
pub mod slider;
pub mod surface;
pub mod tooltip;

use surface::{Rect, Surface};

/// A widget that renders based on mutable state (hover, sort order,
/// hit-test registry).
pub trait StatefulWidget {
    type State;
    fn render(&self, area: Rect, surface: &mut Surface, state: &mut Self::State);
}
