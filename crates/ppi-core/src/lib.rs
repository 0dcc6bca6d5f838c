#![forbid(unsafe_code)]

//! Deterministic view-state primitives for the PricePoint dashboard.
//!
//! This crate holds everything the display layer derives from externally
//! supplied data: metric domains and matrix aggregates ([`stats`]), the
//! discrete color scale ([`color`]), slider track geometry ([`slider`]),
//! filter composition ([`filter`]), and the hover state machine
//! ([`interaction`]). It also provides the timing and supersession
//! primitives the calibration flow builds on: a single-shot re-armable
//! debounce timer ([`debounce`]) and cancellation tokens with a
//! latest-wins request slot ([`cancel`]).
//!
//! Nothing here performs I/O. Every derivation is a pure function of its
//! inputs, and all time-dependent types take explicit [`web_time::Instant`]
//! arguments so behavior is deterministic under test.

pub mod cancel;
pub mod color;
pub mod debounce;
pub mod filter;
pub mod interaction;
pub mod model;
pub mod slider;
pub mod stats;

pub use cancel::{CancellationSource, CancellationToken, RequestSlot};
pub use color::{ColorScale, Rgb};
pub use debounce::DebounceTimer;
pub use model::{
    CalibrationState, MatrixCell, PricingRegion, PromoDomain, PromoKind, SearchFilters, Sku,
    Vendor, VendorKind,
};
