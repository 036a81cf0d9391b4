//! Core library for the `cvs-vaccine` CLI.
//!
//! This crate defines:
//! - The US state registry and CVS endpoint URLs
//! - A lazily warmed-up HTTP session
//! - Typed models for the vaccine status payload
//! - The availability report printed by the CLI
//!
//! It is used by `vaccine-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod state;

pub use config::{BASE_URL, SessionConfig};
pub use error::VaccineError;
pub use model::{BookingStatus, PharmacyStatus, VaccineInfo, VaccineInfoResponse};
pub use report::AvailabilityReport;
pub use session::{HttpResponse, HttpTransport, ReqwestTransport, Session};
pub use state::UsState;
