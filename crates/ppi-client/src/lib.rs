#![forbid(unsafe_code)]

//! Calibration network boundary for the PricePoint dashboard.
//!
//! The promotional-value slider reflects user input immediately and asks
//! the inference service for a recalibrated recommendation after a quiet
//! period. This crate provides the three pieces of that flow:
//!
//! - [`inference`]: the wire contract for
//!   `POST /v1/inference/simulate-promo`, the [`InferenceClient`] trait,
//!   and a blocking HTTP implementation;
//! - [`session`]: the per-instance state machine combining optimistic
//!   updates, the 300ms debounce, and latest-wins request supersession;
//! - [`worker`]: a thread helper that executes pending requests off the
//!   event loop and feeds results back through a channel.
//!
//! [`InferenceClient`]: inference::InferenceClient

pub mod inference;
pub mod session;
pub mod worker;

pub use inference::{
    HttpInferenceClient, InferenceClient, InferenceError, PromoSimulationRequest,
    PromoSimulationResponse,
};
pub use session::{CalibrationSession, PendingRequest, SessionConfig};
pub use worker::spawn_calibration_request;
