#![forbid(unsafe_code)]

//! Track geometry for the calibration slider.
//!
//! Positions are percentages along the track, computed as
//! `(value - min) / (max - min) * 100` over the promotion type's domain
//! and clamped to the track for display.

use crate::model::{CalibrationState, PromoDomain, PromoKind};

/// Fraction of the domain maximum beyond which the user's choice is
/// flagged as diverging from the AI recommendation.
pub const DIVERGENCE_FRACTION: f64 = 0.1;

/// Percentage position of a value along the track, clamped to `[0, 100]`.
pub fn track_pct(value: f64, domain: PromoDomain) -> f64 {
    let span = domain.max - domain.min;
    if span <= 0.0 {
        return 0.0;
    }
    ((value - domain.min) / span * 100.0).clamp(0.0, 100.0)
}

/// Whether the slider diverges from the recommendation enough to warn.
///
/// Purely presentational, never blocking.
pub fn divergence_warning(slider_value: f64, ai_value: f64, domain: PromoDomain) -> bool {
    (slider_value - ai_value).abs() > DIVERGENCE_FRACTION * domain.max
}

/// Derived positions for everything drawn on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    pub value_pct: f64,
    pub ai_pct: f64,
    pub ci_lower_pct: f64,
    pub ci_upper_pct: f64,
    pub warning: bool,
}

/// Compute the full track layout for a calibration state.
pub fn track_layout(state: &CalibrationState, kind: PromoKind) -> TrackLayout {
    let domain = kind.domain();
    TrackLayout {
        value_pct: track_pct(state.slider_value, domain),
        ai_pct: track_pct(state.ai_recommended_value, domain),
        ci_lower_pct: track_pct(state.confidence_interval.0, domain),
        ci_upper_pct: track_pct(state.confidence_interval.1, domain),
        warning: divergence_warning(state.slider_value, state.ai_recommended_value, domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(slider: f64, ai: f64, ci: (f64, f64)) -> CalibrationState {
        CalibrationState {
            slider_value: slider,
            ai_recommended_value: ai,
            confidence_interval: ci,
            projected_lift: 0.0,
            calibration_score: 0.0,
            last_latency_ms: 0.0,
        }
    }

    #[test]
    fn percentage_domain_positions() {
        let layout = track_layout(&state(25.0, 10.0, (5.0, 15.0)), PromoKind::Percentage);
        assert_eq!(layout.value_pct, 50.0);
        assert_eq!(layout.ai_pct, 20.0);
        assert_eq!(layout.ci_lower_pct, 10.0);
        assert_eq!(layout.ci_upper_pct, 30.0);
    }

    #[test]
    fn volume_domain_positions() {
        let layout = track_layout(&state(250.0, 100.0, (50.0, 150.0)), PromoKind::Volume);
        assert_eq!(layout.value_pct, 50.0);
        assert_eq!(layout.ai_pct, 20.0);
    }

    #[test]
    fn out_of_domain_values_clamp_to_track() {
        let domain = PromoKind::Percentage.domain();
        assert_eq!(track_pct(-5.0, domain), 0.0);
        assert_eq!(track_pct(75.0, domain), 100.0);
    }

    #[test]
    fn warning_triggers_past_a_tenth_of_domain_max() {
        let domain = PromoKind::Percentage.domain();
        // Threshold is 5.0 for the percentage domain.
        assert!(!divergence_warning(14.0, 10.0, domain));
        assert!(!divergence_warning(15.0, 10.0, domain));
        assert!(divergence_warning(15.1, 10.0, domain));
        assert!(divergence_warning(4.0, 10.0, domain));
    }
}
