//! HTTP API module for the Rate Card Engine.
//!
//! This module provides the pricing simulator endpoints: `/simulate` prices a
//! scenario against a configured or inline rate card, and `/validate` reports
//! authoring issues in a set of charges.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{SimulationRequest, ValidationRequest, ValidationResponse};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
