#![forbid(unsafe_code)]

//! Debounced calibration session.
//!
//! One logical session per mounted slider instance. Drags update the
//! displayed value immediately (optimistic update) and re-arm a 300ms
//! debounce; when the quiet period elapses, [`poll`](CalibrationSession::poll)
//! hands the host a [`PendingRequest`] to execute, superseding whatever was
//! in flight. Responses come back through
//! [`apply`](CalibrationSession::apply), which only lands results carrying
//! the current generation: the last request wins regardless of network
//! ordering.
//!
//! The session never reads the clock; hosts pass [`Instant`]s, which keeps
//! the whole machine deterministic under test.

use ppi_core::cancel::{CancellationToken, RequestSlot};
use ppi_core::debounce::DebounceTimer;
use ppi_core::model::{CalibrationState, PromoKind};
use ppi_core::slider::{TrackLayout, track_layout};
use web_time::{Duration, Instant};

use crate::inference::{InferenceError, PromoSimulationRequest, PromoSimulationResponse};

/// Static configuration for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub sku_id: String,
    /// Location code sent with every simulation request.
    pub location: String,
    pub promo_kind: PromoKind,
    /// Undiscounted price the promotion applies to.
    pub current_price: f64,
    pub quiet_period: Duration,
}

impl SessionConfig {
    pub fn new(
        sku_id: impl Into<String>,
        location: impl Into<String>,
        promo_kind: PromoKind,
        current_price: f64,
    ) -> Self {
        Self {
            sku_id: sku_id.into(),
            location: location.into(),
            promo_kind,
            current_price,
            quiet_period: ppi_core::debounce::DEFAULT_QUIET_PERIOD,
        }
    }
}

/// A request the host must execute (directly or via the worker helper).
///
/// The token is already wired into the session's supersession slot: a later
/// drag cancels it, and [`CalibrationSession::apply`] discards its result.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub generation: u64,
    pub token: CancellationToken,
    pub request: PromoSimulationRequest,
}

type ValueCallback = Box<dyn FnMut(f64) + Send>;

/// The calibration state machine.
pub struct CalibrationSession {
    config: SessionConfig,
    state: CalibrationState,
    debounce: DebounceTimer,
    slot: RequestSlot,
    on_value_change: Option<ValueCallback>,
    shut_down: bool,
}

impl CalibrationSession {
    /// Start a session from caller-supplied initial values.
    pub fn new(config: SessionConfig, initial: CalibrationState) -> Self {
        let debounce = DebounceTimer::with_quiet_period(config.quiet_period);
        Self {
            config,
            state: initial,
            debounce,
            slot: RequestSlot::new(),
            on_value_change: None,
            shut_down: false,
        }
    }

    /// Register the external value-change callback, invoked synchronously
    /// on every drag.
    #[must_use]
    pub fn on_value_change(mut self, callback: impl FnMut(f64) + Send + 'static) -> Self {
        self.on_value_change = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &CalibrationState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Track geometry for the current state.
    pub fn track_layout(&self) -> TrackLayout {
        track_layout(&self.state, self.config.promo_kind)
    }

    /// Whether a request is in flight (issued and not yet applied or
    /// superseded).
    pub fn has_in_flight(&self) -> bool {
        self.slot.has_in_flight()
    }

    /// User dragged the slider.
    ///
    /// The displayed value updates and the callback fires synchronously
    /// and unconditionally; success of any later network round trip has
    /// no bearing on it. The debounce is re-armed.
    pub fn drag(&mut self, value: f64, now: Instant) {
        if self.shut_down {
            return;
        }
        self.state.slider_value = value;
        if let Some(callback) = self.on_value_change.as_mut() {
            callback(value);
        }
        self.debounce.arm(now);
    }

    /// Advance the debounce. When the quiet period has elapsed, returns
    /// the request to issue; any previously in-flight request is cancelled
    /// at that moment.
    pub fn poll(&mut self, now: Instant) -> Option<PendingRequest> {
        if self.shut_down || !self.debounce.fire(now) {
            return None;
        }
        let (generation, token) = self.slot.begin();
        let request = PromoSimulationRequest::new(
            self.config.sku_id.clone(),
            self.config.current_price,
            self.config.promo_kind,
            self.state.slider_value,
            self.config.location.clone(),
        );
        tracing::debug!(
            generation,
            promo_value = request.promo_value,
            "issuing calibration request"
        );
        Some(PendingRequest {
            generation,
            token,
            request,
        })
    }

    /// Deliver the outcome of a request.
    ///
    /// Stale generations and cancellations are discarded silently. A
    /// successful current-generation response replaces every
    /// server-controlled field; the slider value is left untouched. Other
    /// failures are logged and leave state exactly as it was; re-dragging
    /// is the implicit retry path.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<PromoSimulationResponse, InferenceError>,
    ) {
        if self.shut_down {
            return;
        }
        if !self.slot.finish(generation) {
            tracing::debug!(generation, "discarding superseded calibration response");
            return;
        }
        match result {
            Ok(response) => {
                self.state.ai_recommended_value = response.ai_recommended_value;
                self.state.confidence_interval =
                    (response.confidence_interval[0], response.confidence_interval[1]);
                self.state.projected_lift = response.projected_lift;
                self.state.calibration_score = response.calibration_score;
                self.state.last_latency_ms = response.latency_ms;
                tracing::debug!(
                    generation,
                    ai_value = response.ai_recommended_value,
                    "applied calibration response"
                );
            }
            Err(err) if err.is_cancelled() => {}
            Err(err) => {
                tracing::warn!(generation, error = %err, "calibration request failed");
            }
        }
    }

    /// Tear the session down: cancel the pending debounce and any
    /// in-flight request. Every entry point is a no-op afterwards, so no
    /// callback can fire against an unmounted instance.
    pub fn shutdown(&mut self) {
        self.debounce.cancel();
        self.slot.cancel_in_flight();
        self.shut_down = true;
    }
}

impl Drop for CalibrationSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for CalibrationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalibrationSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}
