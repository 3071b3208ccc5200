//! Lane ordering for pending pickup requests.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::contract::{stable_contract_json, QueueSnapshot, RideRequest, SNAPSHOT_SCHEMA_VERSION};

/// A ride request with its 1-based place in line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueEntry {
    pub position: usize,
    pub request: RideRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaneQueue {
    pub lane_id: String,
    pub in_line: usize,
    pub entries: Vec<QueueEntry>,
    pub fingerprint: String,
    pub schema_version: String,
}

/// Earlier physical arrival first, then earlier announcement.
pub fn compare_requests(a: &RideRequest, b: &RideRequest) -> Ordering {
    a.arrival_time
        .cmp(&b.arrival_time)
        .then_with(|| a.announce_time.cmp(&b.announce_time))
}

/// Return the requests in pickup order without touching the input.
///
/// `sort_by` is stable, so requests with identical timestamps keep their
/// input order.
pub fn order_queue(requests: &[RideRequest]) -> Vec<RideRequest> {
    let mut ordered = requests.to_vec();
    ordered.sort_by(compare_requests);
    ordered
}

/// 1-based position of the first request with `ride_id` once ordered.
pub fn position_of(requests: &[RideRequest], ride_id: &str) -> Option<usize> {
    order_queue(requests)
        .iter()
        .position(|request| request.id == ride_id)
        .map(|index| index + 1)
}

pub fn build_lane_queue(snapshot: &QueueSnapshot) -> LaneQueue {
    let entries: Vec<QueueEntry> = order_queue(&snapshot.requests)
        .into_iter()
        .enumerate()
        .map(|(index, request)| QueueEntry {
            position: index + 1,
            request,
        })
        .collect();

    LaneQueue {
        lane_id: snapshot.lane_id.clone(),
        in_line: entries.len(),
        fingerprint: queue_fingerprint(&entries),
        entries,
        schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
    }
}

pub fn queue_fingerprint(entries: &[QueueEntry]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(stable_contract_json(entries));
    format!("{:x}", hasher.finalize())
}
