#![forbid(unsafe_code)]

//! Calibration slider display.
//!
//! Renders the promotional-value track: the user's handle, the AI anchor,
//! the shaded confidence band between the interval bounds, a divergence
//! warning when the user strays far from the recommendation, and a
//! readout row with lift, score, and latency. The widget is display-only;
//! hosts map pointer columns back to domain values with
//! [`CalibrationSlider::value_at`] and drive the session with the result.

use ppi_core::color::Rgb;
use ppi_core::model::{CalibrationState, PromoKind};
use ppi_core::slider::track_layout;

use crate::surface::{Rect, Style, Surface};
use crate::StatefulWidget;

const BAND_COLOR: Rgb = Rgb(0x4a, 0x6f, 0xa5);
const ANCHOR_COLOR: Rgb = Rgb(0x9e, 0x9d, 0x24);
const WARNING_COLOR: Rgb = Rgb(0xc6, 0x28, 0x28);

/// Display state handed to the widget each render.
#[derive(Debug, Clone)]
pub struct SliderView {
    pub calibration: CalibrationState,
    pub kind: PromoKind,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CalibrationSlider {
    show_readout: bool,
}

impl CalibrationSlider {
    pub fn new() -> Self {
        Self { show_readout: true }
    }

    #[must_use]
    pub fn show_readout(mut self, show: bool) -> Self {
        self.show_readout = show;
        self
    }

    /// Column of a track percentage within `area`.
    pub fn column_for_pct(area: Rect, pct: f64) -> u16 {
        if area.width <= 1 {
            return area.x;
        }
        area.x + (pct / 100.0 * f64::from(area.width - 1)).round() as u16
    }

    /// Map a pointer column back to a domain value, snapped to the
    /// promotion type's step and clamped to its domain. Hosts feed the
    /// result into the calibration session as a drag.
    pub fn value_at(area: Rect, x: u16, kind: PromoKind) -> f64 {
        let domain = kind.domain();
        if area.width <= 1 {
            return domain.min;
        }
        let t = f64::from(x.saturating_sub(area.x)).min(f64::from(area.width - 1))
            / f64::from(area.width - 1);
        let raw = domain.min + t * (domain.max - domain.min);
        let snapped = domain.min + ((raw - domain.min) / domain.step).round() * domain.step;
        snapped.clamp(domain.min, domain.max)
    }
}

impl StatefulWidget for CalibrationSlider {
    type State = SliderView;

    fn render(&self, area: Rect, surface: &mut Surface, view: &mut SliderView) {
        if area.is_empty() {
            return;
        }
        let layout = track_layout(&view.calibration, view.kind);
        let domain = view.kind.domain();

        // Header: current value, AI recommendation, divergence warning.
        let mut header = format!(
            "promo {:.1} of {:.0}  (ai {:.1})",
            view.calibration.slider_value, domain.max, view.calibration.ai_recommended_value
        );
        if layout.warning {
            header.push_str("  ! diverges from recommendation");
        }
        let header_style = if layout.warning {
            Style::new().fg(WARNING_COLOR).bold()
        } else {
            Style::new()
        };
        surface.set_str(area.x, area.y, &header, header_style);

        if area.height < 2 {
            return;
        }
        let track = Rect::new(area.x, area.y + 1, area.width, 1);

        // Base track, then confidence band, anchor, and handle on top.
        surface.fill(track, '─', Style::new().dim());
        let lo = Self::column_for_pct(track, layout.ci_lower_pct);
        let hi = Self::column_for_pct(track, layout.ci_upper_pct);
        for x in lo..=hi {
            surface.set(x, track.y, '═', Style::new().fg(BAND_COLOR));
        }
        surface.set(
            Self::column_for_pct(track, layout.ai_pct),
            track.y,
            '◆',
            Style::new().fg(ANCHOR_COLOR),
        );
        surface.set(
            Self::column_for_pct(track, layout.value_pct),
            track.y,
            '█',
            Style::new().bold(),
        );

        if self.show_readout && area.height >= 3 {
            let readout = format!(
                "lift +{:.1}%  score {:.2}  {:.0}ms",
                view.calibration.projected_lift,
                view.calibration.calibration_score,
                view.calibration.last_latency_ms
            );
            surface.set_str(area.x, area.y + 2, &readout, Style::new().dim());
        }
    }
}
