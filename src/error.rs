//! Error types for the Rate Card Engine.
//!
//! Errors are raised when rate cards are authored, loaded or looked up. The
//! evaluation functions themselves never fail: they degrade to a defined
//! number instead (see [`crate::calculation`]).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Rate Card Engine.
///
/// # Example
///
/// ```
/// use rate_card_engine::error::EngineError;
///
/// let error = EngineError::DuplicatePriority { priority: 3 };
/// assert_eq!(error.to_string(), "Duplicate charge priority: 3");
/// assert_eq!(error.code(), "DUPLICATE_PRIORITY");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configured rate card failed authoring validation.
    #[error("Invalid rate card '{id}': {message}")]
    InvalidRateCard {
        /// The identifier of the rejected rate card.
        id: String,
        /// A description of the first validation failure.
        message: String,
    },

    /// No rate card exists with the requested identifier.
    #[error("Rate card not found: {id}")]
    RateCardNotFound {
        /// The identifier that was not found.
        id: String,
    },

    /// The rate card exists but its validity window does not cover the date.
    #[error("Rate card '{id}' is not effective on {date}")]
    RateCardNotEffective {
        /// The identifier of the rate card.
        id: String,
        /// The date that fell outside the validity window.
        date: NaiveDate,
    },

    /// A per-weight charge was authored without any rate breaks.
    #[error("Per-weight charge at priority {priority} requires at least one rate break")]
    MissingBreaks {
        /// The priority of the offending charge.
        priority: i32,
    },

    /// Two actual-weight rate breaks overlap or touch.
    #[error("Rate breaks overlap: range ending at {upper} reaches the break starting at {next_min}")]
    OverlappingBreaks {
        /// The upper bound of the earlier break (`+` when unbounded).
        upper: String,
        /// The lower bound of the following break.
        next_min: Decimal,
    },

    /// A rate break has its upper bound below its lower bound.
    #[error("Invalid rate break bounds: max {max} is below min {min}")]
    InvalidBreakBounds {
        /// The lower bound of the break.
        min: Decimal,
        /// The upper bound of the break.
        max: Decimal,
    },

    /// Two charges in the same rate card share a priority.
    #[error("Duplicate charge priority: {priority}")]
    DuplicatePriority {
        /// The priority used more than once.
        priority: i32,
    },

    /// A rate, bound or value that must be non-negative was negative.
    #[error("Field '{field}' must not be negative (got {value})")]
    NegativeValue {
        /// The name of the offending field.
        field: String,
        /// The negative value supplied.
        value: Decimal,
    },

    /// More than one thermal modifier targets the same thermal profile.
    #[error("Duplicate thermal modifier for profile '{thermal_profile}'")]
    DuplicateThermalModifier {
        /// The thermal profile with more than one modifier.
        thermal_profile: String,
    },

    /// A request could not be turned into an evaluation.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of what is missing or inconsistent.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::InvalidRateCard { .. } => "INVALID_RATE_CARD",
            EngineError::RateCardNotFound { .. } => "RATE_CARD_NOT_FOUND",
            EngineError::RateCardNotEffective { .. } => "RATE_CARD_NOT_EFFECTIVE",
            EngineError::MissingBreaks { .. } => "MISSING_BREAKS",
            EngineError::OverlappingBreaks { .. } => "OVERLAPPING_BREAKS",
            EngineError::InvalidBreakBounds { .. } => "INVALID_BREAK_BOUNDS",
            EngineError::DuplicatePriority { .. } => "DUPLICATE_PRIORITY",
            EngineError::NegativeValue { .. } => "NEGATIVE_VALUE",
            EngineError::DuplicateThermalModifier { .. } => "DUPLICATE_THERMAL_MODIFIER",
            EngineError::InvalidRequest { .. } => "INVALID_REQUEST",
        }
    }

    /// Returns true for errors raised by authoring-time validation.
    pub fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            EngineError::MissingBreaks { .. }
                | EngineError::OverlappingBreaks { .. }
                | EngineError::InvalidBreakBounds { .. }
                | EngineError::DuplicatePriority { .. }
                | EngineError::NegativeValue { .. }
                | EngineError::DuplicateThermalModifier { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
