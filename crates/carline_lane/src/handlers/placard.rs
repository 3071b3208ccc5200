use carline_core::placard::{decode_placard_payload, PlacardError, PlacardPayload};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::LaneConfig;
use crate::handlers::HandlerError;
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "placard_handler";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacardIssued {
    pub token: String,
    pub placard_code: String,
    pub ride_id: String,
    pub ttl_sec: i64,
}

impl From<PlacardError> for HandlerError {
    fn from(error: PlacardError) -> Self {
        HandlerError::new(error.code(), error.to_string())
    }
}

/// Issue a placard token; `ttl_sec` falls back to the lane's configured TTL.
pub fn handle_placard_encode(
    placard_code: &str,
    ride_id: &str,
    ttl_sec: Option<i64>,
    config: &LaneConfig,
) -> Result<PlacardIssued, HandlerError> {
    let ttl_sec = ttl_sec.unwrap_or(config.placard_ttl_sec);
    let payload = match PlacardPayload::new(placard_code, ride_id, ttl_sec) {
        Ok(value) => value,
        Err(error) => {
            log_error(
                COMPONENT,
                "placard_rejected",
                json!({"code": error.code(), "ride_id": ride_id}),
            );
            return Err(error.into());
        }
    };

    let token = payload.encode();
    log_info(
        COMPONENT,
        "placard_encoded",
        json!({
            "lane_id": config.lane_id.clone(),
            "ride_id": payload.ride_id.clone(),
            "ttl_sec": payload.ttl_sec,
        }),
    );
    Ok(PlacardIssued {
        token,
        placard_code: payload.placard_code,
        ride_id: payload.ride_id,
        ttl_sec: payload.ttl_sec,
    })
}

pub fn handle_placard_decode(token: &str) -> Result<PlacardPayload, HandlerError> {
    match decode_placard_payload(token) {
        Ok(payload) => {
            log_info(
                COMPONENT,
                "placard_decoded",
                json!({"ride_id": payload.ride_id.clone(), "ttl_sec": payload.ttl_sec}),
            );
            Ok(payload)
        }
        Err(error) => {
            log_error(
                COMPONENT,
                "placard_malformed",
                json!({"code": error.code()}),
            );
            Err(error.into())
        }
    }
}
