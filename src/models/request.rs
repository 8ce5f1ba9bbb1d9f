use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a cleaning request. Transitions move forward only in
/// practice (pending -> approved -> completed) but nothing enforces it: a
/// patch may write any status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Completed,
}

impl RequestStatus {
    /// Lowercase form, same as the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Completed => "Completed",
        }
    }
}

/// A cleaning request as persisted under the `cleaningRequests` storage key.
/// Field names serialize in camelCase so the stored JSON stays compatible
/// with documents written by earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningRequest {
    pub id: String,
    pub owner_email: String,
    pub cabin_address: String,
    pub checkout_date: String,
    pub checkout_time: String,
    #[serde(default)]
    pub special_requests: String,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Owner-supplied fields for creating a request. Status and timestamps are
/// assigned by the backend, so a caller cannot smuggle them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCleaningRequest {
    pub owner_email: String,
    pub cabin_address: String,
    pub checkout_date: String,
    pub checkout_time: String,
    #[serde(default)]
    pub special_requests: String,
}

/// Field-level partial update for PATCH. Only `Some` fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningRequestPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabin_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
}

impl CleaningRequestPatch {
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Dashboard aggregation, recomputed from a full list fetch on every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub completed: usize,
    pub this_week: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_legacy_storage_document() {
        // Shape written by earlier versions of the app, optional fields missing
        let json = r#"{
            "id": "demo-1002",
            "ownerEmail": "demo@email.com",
            "cabinAddress": "123 Lakeshore Drive, Pine Lake Resort",
            "checkoutDate": "2025-08-05",
            "checkoutTime": "10:30",
            "specialRequests": "",
            "status": "pending",
            "submittedAt": "2025-07-29T16:15:00Z"
        }"#;

        let request: CleaningRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.owner_email, "demo@email.com");
        assert!(request.approved_at.is_none());
        assert!(request.completed_at.is_none());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"approved\""
        );
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = CleaningRequestPatch::status(RequestStatus::Completed);
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            "{\"status\":\"completed\"}"
        );
    }
}
