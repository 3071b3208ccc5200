//! Placard tokens shown as a QR code or numeric fallback.
//!
//! A token is `<placard_code>.<ride_id>.<ttl_sec>`. Neither identifier may
//! contain the delimiter, so every token produced here decodes back to the
//! exact fields it was built from.

use serde::{Deserialize, Serialize};

pub const PLACARD_DELIMITER: char = '.';
/// Parent placards refresh every two minutes.
pub const DEFAULT_PLACARD_TTL_SEC: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgumentReason {
    MissingPlacardCode,
    MissingRideId,
    NonPositiveTtl,
    PlacardCodeContainsDelimiter,
    RideIdContainsDelimiter,
}

impl InvalidArgumentReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingPlacardCode => "missing_placard_code",
            Self::MissingRideId => "missing_ride_id",
            Self::NonPositiveTtl => "non_positive_ttl",
            Self::PlacardCodeContainsDelimiter => "placard_code_contains_delimiter",
            Self::RideIdContainsDelimiter => "ride_id_contains_delimiter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    WrongPartCount { found: usize },
    EmptyPlacardCode,
    EmptyRideId,
    InvalidTtl,
}

impl MalformedReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::WrongPartCount { .. } => "wrong_part_count",
            Self::EmptyPlacardCode => "empty_placard_code",
            Self::EmptyRideId => "empty_ride_id",
            Self::InvalidTtl => "invalid_ttl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacardError {
    InvalidArgument(InvalidArgumentReason),
    Malformed(MalformedReason),
}

impl PlacardError {
    /// Stable snake_case code for machine consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(reason) => reason.as_str(),
            Self::Malformed(reason) => reason.as_str(),
        }
    }
}

impl std::fmt::Display for PlacardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(InvalidArgumentReason::MissingPlacardCode) => {
                f.write_str("placard_code is required")
            }
            Self::InvalidArgument(InvalidArgumentReason::MissingRideId) => {
                f.write_str("ride_id is required")
            }
            Self::InvalidArgument(InvalidArgumentReason::NonPositiveTtl) => {
                f.write_str("ttl_sec must be > 0")
            }
            Self::InvalidArgument(InvalidArgumentReason::PlacardCodeContainsDelimiter) => {
                write!(f, "placard_code must not contain '{PLACARD_DELIMITER}'")
            }
            Self::InvalidArgument(InvalidArgumentReason::RideIdContainsDelimiter) => {
                write!(f, "ride_id must not contain '{PLACARD_DELIMITER}'")
            }
            Self::Malformed(MalformedReason::WrongPartCount { found }) => {
                write!(f, "placard token must have 3 parts, found {found}")
            }
            Self::Malformed(MalformedReason::EmptyPlacardCode) => {
                f.write_str("placard token has an empty placard code")
            }
            Self::Malformed(MalformedReason::EmptyRideId) => {
                f.write_str("placard token has an empty ride id")
            }
            Self::Malformed(MalformedReason::InvalidTtl) => {
                f.write_str("placard token ttl is not a positive integer")
            }
        }
    }
}

impl std::error::Error for PlacardError {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacardPayload {
    pub placard_code: String,
    pub ride_id: String,
    pub ttl_sec: i64,
}

impl PlacardPayload {
    pub fn new(
        placard_code: impl Into<String>,
        ride_id: impl Into<String>,
        ttl_sec: i64,
    ) -> Result<Self, PlacardError> {
        let placard_code = placard_code.into();
        let ride_id = ride_id.into();
        validate_fields(&placard_code, &ride_id, ttl_sec)?;
        Ok(Self {
            placard_code,
            ride_id,
            ttl_sec,
        })
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{PLACARD_DELIMITER}{}{PLACARD_DELIMITER}{}",
            self.placard_code, self.ride_id, self.ttl_sec
        )
    }
}

fn validate_fields(placard_code: &str, ride_id: &str, ttl_sec: i64) -> Result<(), PlacardError> {
    if placard_code.is_empty() {
        return Err(PlacardError::InvalidArgument(
            InvalidArgumentReason::MissingPlacardCode,
        ));
    }
    if placard_code.contains(PLACARD_DELIMITER) {
        return Err(PlacardError::InvalidArgument(
            InvalidArgumentReason::PlacardCodeContainsDelimiter,
        ));
    }
    if ride_id.is_empty() {
        return Err(PlacardError::InvalidArgument(
            InvalidArgumentReason::MissingRideId,
        ));
    }
    if ride_id.contains(PLACARD_DELIMITER) {
        return Err(PlacardError::InvalidArgument(
            InvalidArgumentReason::RideIdContainsDelimiter,
        ));
    }
    if ttl_sec <= 0 {
        return Err(PlacardError::InvalidArgument(
            InvalidArgumentReason::NonPositiveTtl,
        ));
    }
    Ok(())
}

pub fn build_placard_payload(
    placard_code: &str,
    ride_id: &str,
    ttl_sec: i64,
) -> Result<String, PlacardError> {
    PlacardPayload::new(placard_code, ride_id, ttl_sec).map(|payload| payload.encode())
}

pub fn decode_placard_payload(token: &str) -> Result<PlacardPayload, PlacardError> {
    let parts: Vec<&str> = token.split(PLACARD_DELIMITER).collect();
    let [placard_code, ride_id, ttl_text] = parts.as_slice() else {
        return Err(PlacardError::Malformed(MalformedReason::WrongPartCount {
            found: parts.len(),
        }));
    };

    if placard_code.is_empty() {
        return Err(PlacardError::Malformed(MalformedReason::EmptyPlacardCode));
    }
    if ride_id.is_empty() {
        return Err(PlacardError::Malformed(MalformedReason::EmptyRideId));
    }

    // `i64::from_str` accepts a leading sign, which encode never emits.
    if ttl_text.is_empty() || !ttl_text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(PlacardError::Malformed(MalformedReason::InvalidTtl));
    }
    let ttl_sec = match ttl_text.parse::<i64>() {
        Ok(value) if value > 0 => value,
        _ => return Err(PlacardError::Malformed(MalformedReason::InvalidTtl)),
    };

    Ok(PlacardPayload {
        placard_code: placard_code.to_string(),
        ride_id: ride_id.to_string(),
        ttl_sec,
    })
}
