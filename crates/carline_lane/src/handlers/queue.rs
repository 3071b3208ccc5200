use carline_core::contract::{normalize_snapshot, QueueSnapshot, RideRequest};
use carline_core::queue::{build_lane_queue, position_of, LaneQueue};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::LaneConfig;
use crate::handlers::HandlerError;
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "queue_handler";

#[derive(Debug, Deserialize)]
struct SnapshotEvent {
    lane_id: Option<String>,
    #[serde(default)]
    requests: Vec<RideRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionResponse {
    pub lane_id: String,
    pub ride_id: String,
    pub position: usize,
    pub in_line: usize,
}

/// Order the pending set carried by `event`.
///
/// Accepts a bare array of ride requests, a `{lane_id, requests}` object, or
/// either of those wrapped in a `{"body": ...}` envelope.
pub fn handle_queue_event(event: Value, config: &LaneConfig) -> Result<LaneQueue, HandlerError> {
    let snapshot = load_snapshot_event(event, config)?;

    let lane = build_lane_queue(&snapshot);
    log_info(
        COMPONENT,
        "queue_ordered",
        json!({
            "lane_id": lane.lane_id.clone(),
            "in_line": lane.in_line,
            "fingerprint": lane.fingerprint.clone(),
        }),
    );
    Ok(lane)
}

pub fn handle_position_event(
    event: Value,
    ride_id: &str,
    config: &LaneConfig,
) -> Result<PositionResponse, HandlerError> {
    let snapshot = load_snapshot_event(event, config)?;
    let Some(position) = position_of(&snapshot.requests, ride_id) else {
        log_error(
            COMPONENT,
            "ride_not_in_line",
            json!({"lane_id": snapshot.lane_id.clone(), "ride_id": ride_id}),
        );
        return Err(HandlerError::new(
            "not_found",
            format!("Ride '{ride_id}' is not in lane {}", snapshot.lane_id),
        ));
    };

    log_info(
        COMPONENT,
        "position_resolved",
        json!({"lane_id": snapshot.lane_id.clone(), "ride_id": ride_id, "position": position}),
    );
    Ok(PositionResponse {
        in_line: snapshot.requests.len(),
        lane_id: snapshot.lane_id,
        ride_id: ride_id.to_string(),
        position,
    })
}

fn load_snapshot_event(event: Value, config: &LaneConfig) -> Result<QueueSnapshot, HandlerError> {
    parse_snapshot_event(event, config).inspect_err(|error| {
        log_error(
            COMPONENT,
            "snapshot_rejected",
            json!({"code": error.code.clone(), "message": error.message.clone()}),
        );
    })
}

fn parse_snapshot_event(event: Value, config: &LaneConfig) -> Result<QueueSnapshot, HandlerError> {
    let payload = unwrap_envelope(event)?;

    let snapshot_event = match payload {
        Value::Array(_) => SnapshotEvent {
            lane_id: None,
            requests: serde_json::from_value(payload).map_err(|error| {
                HandlerError::new("malformed_request", format!("Malformed request: {error}"))
            })?,
        },
        Value::Object(_) => serde_json::from_value(payload).map_err(|error| {
            HandlerError::new("malformed_request", format!("Malformed request: {error}"))
        })?,
        _ => {
            return Err(HandlerError::new(
                "malformed_request",
                "Snapshot must be a JSON array or object",
            ));
        }
    };

    let snapshot = QueueSnapshot {
        lane_id: snapshot_event
            .lane_id
            .unwrap_or_else(|| config.lane_id.clone()),
        requests: snapshot_event.requests,
    };

    normalize_snapshot(snapshot)
        .map_err(|error| HandlerError::new("validation_error", error.message()))
}

fn unwrap_envelope(event: Value) -> Result<Value, HandlerError> {
    let Some(object) = event.as_object() else {
        return Ok(event);
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) | Value::Array(_) => Ok(body.clone()),
        Value::String(text) => serde_json::from_str(text).map_err(|error| {
            HandlerError::new("malformed_request", format!("Malformed JSON body: {error}"))
        }),
        _ => Err(HandlerError::new(
            "malformed_request",
            "Request body must be a JSON object or array",
        )),
    }
}
