#![forbid(unsafe_code)]

//! Off-loop execution of pending calibration requests.
//!
//! The session itself never blocks; a host that wants real HTTP hands each
//! [`PendingRequest`] to [`spawn_calibration_request`], then drains the
//! channel on its event loop and feeds `(generation, result)` pairs back
//! into [`CalibrationSession::apply`]. Stale results are harmless; the
//! generation gate inside `apply` drops them.
//!
//! ```no_run
//! use std::sync::{Arc, mpsc};
//! use ppi_client::{HttpInferenceClient, spawn_calibration_request};
//! # use ppi_client::{CalibrationSession, SessionConfig};
//! # use ppi_core::model::{CalibrationState, PromoKind};
//! # use web_time::Instant;
//!
//! # let mut session = CalibrationSession::new(
//! #     SessionConfig::new("SKU-1", "35242", PromoKind::Percentage, 2.99),
//! #     CalibrationState {
//! #         slider_value: 10.0,
//! #         ai_recommended_value: 10.0,
//! #         confidence_interval: (8.0, 12.0),
//! #         projected_lift: 0.0,
//! #         calibration_score: 0.0,
//! #         last_latency_ms: 0.0,
//! #     },
//! # );
//! let client: Arc<HttpInferenceClient> =
//!     Arc::new(HttpInferenceClient::new("http://localhost:8000").unwrap());
//! let (tx, rx) = mpsc::channel();
//!
//! if let Some(pending) = session.poll(Instant::now()) {
//!     spawn_calibration_request(client.clone(), pending, tx.clone());
//! }
//! while let Ok((generation, result)) = rx.try_recv() {
//!     session.apply(generation, result);
//! }
//! ```
//!
//! [`CalibrationSession::apply`]: crate::session::CalibrationSession::apply

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::inference::{InferenceClient, InferenceError, PromoSimulationResponse};
use crate::session::PendingRequest;

/// Result pair delivered back to the session owner.
pub type CalibrationResult = (u64, Result<PromoSimulationResponse, InferenceError>);

/// Execute one pending request on a background thread.
///
/// The send is best-effort: a receiver dropped during teardown simply
/// discards the result, which matches the session's own teardown rule.
pub fn spawn_calibration_request(
    client: Arc<dyn InferenceClient>,
    pending: PendingRequest,
    results: Sender<CalibrationResult>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let outcome = client.simulate_promo(&pending.request, &pending.token);
        let _ = results.send((pending.generation, outcome));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppi_core::cancel::CancellationToken;
    use crate::inference::PromoSimulationRequest;
    use ppi_core::model::PromoKind;
    use std::sync::mpsc;

    struct EchoClient;

    impl InferenceClient for EchoClient {
        fn simulate_promo(
            &self,
            request: &PromoSimulationRequest,
            _cancel: &CancellationToken,
        ) -> Result<PromoSimulationResponse, InferenceError> {
            Ok(PromoSimulationResponse {
                projected_lift: request.promo_value * 1.5,
                confidence_interval: [request.promo_value - 2.0, request.promo_value + 2.0],
                ai_recommended_value: request.promo_value,
                calibration_score: 0.9,
                latency_ms: 1.0,
                model_version: "test".into(),
            })
        }
    }

    #[test]
    fn worker_delivers_generation_and_result() {
        let (tx, rx) = mpsc::channel();
        let pending = PendingRequest {
            generation: 7,
            token: CancellationToken::never(),
            request: PromoSimulationRequest::new("SKU-1", 2.99, PromoKind::Percentage, 10.0, "35242"),
        };
        let handle = spawn_calibration_request(Arc::new(EchoClient), pending, tx);
        let (generation, result) = rx.recv().unwrap();
        handle.join().unwrap();
        assert_eq!(generation, 7);
        assert_eq!(result.unwrap().ai_recommended_value, 10.0);
    }

    #[test]
    fn dropped_receiver_discards_result_without_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let pending = PendingRequest {
            generation: 1,
            token: CancellationToken::never(),
            request: PromoSimulationRequest::new("SKU-1", 2.99, PromoKind::Volume, 50.0, "35242"),
        };
        spawn_calibration_request(Arc::new(EchoClient), pending, tx)
            .join()
            .unwrap();
    }
}
