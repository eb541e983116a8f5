//! Testing infrastructure for breathometer.
//!
//! Deterministic building blocks for unit, integration and property tests:
//!
//! - **[`StubTextGenerator`]**: a scripted [`TextGenerator`](crate::insights::TextGenerator)
//!   that answers with fixed text, fails with a chosen [`InsightError`](crate::core::InsightError),
//!   or stalls past a timeout, and counts how often it was called
//! - **Fixtures**: request and aggregate builders plus a valid remote payload
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use breathometer::insights::{InsightGenerator, RemoteStrategy};
//! use breathometer::testkit::{valid_remote_payload, StubTextGenerator};
//! use std::time::Duration;
//!
//! let stub = StubTextGenerator::fixed(valid_remote_payload());
//! let generator = InsightGenerator::with_remote(Box::new(RemoteStrategy::new(
//!     stub,
//!     Duration::from_secs(1),
//! )));
//! ```

pub mod helpers;
pub mod stub_generator;

pub use helpers::{
    aggregates_fixture, asthmatic_request, polluted_elderly_smoker_request, smoker_request,
    valid_remote_payload,
};
pub use stub_generator::StubTextGenerator;
