//! Rate Card Charge Evaluation Engine
//!
//! This crate evaluates logistics rate cards: ordered pricing rules (flat fees,
//! per-distance, tiered per-weight and percentage-of-subtotal charges) applied to
//! an order scenario, with optional thermal-profile adjustment and hybrid
//! compartment allocation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
