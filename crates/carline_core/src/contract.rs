use serde::{Deserialize, Serialize};

pub const SNAPSHOT_SCHEMA_VERSION: &str = "v1";

/// One guardian's pickup request in the lane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RideRequest {
    pub id: String,
    /// When the vehicle physically arrived in the lane.
    pub arrival_time: u64,
    /// When the guardian electronically announced the pickup.
    pub announce_time: u64,
}

impl RideRequest {
    pub fn new(id: impl Into<String>, arrival_time: u64, announce_time: u64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            announce_time,
        }
    }
}

/// Immutable view of the pending set for a single lane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub lane_id: String,
    #[serde(default)]
    pub requests: Vec<RideRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Trim the lane id and reject snapshots that cannot be ordered meaningfully.
///
/// Request order and duplicates are preserved as delivered.
pub fn normalize_snapshot(snapshot: QueueSnapshot) -> Result<QueueSnapshot, ValidationError> {
    let lane_id = snapshot.lane_id.trim().to_string();
    if lane_id.is_empty() {
        return Err(ValidationError::new("lane_id cannot be empty"));
    }

    for (index, request) in snapshot.requests.iter().enumerate() {
        if request.id.is_empty() {
            return Err(ValidationError::new(format!(
                "Ride request at index {index} has an empty id"
            )));
        }
    }

    Ok(QueueSnapshot {
        lane_id,
        requests: snapshot.requests,
    })
}

pub fn stable_contract_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of contract value should not fail")
}
