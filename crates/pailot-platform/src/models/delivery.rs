//! Delivery Models
//!
//! Deliveries are owned by the backend; the app only reads them and
//! requests state changes.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub pickup: String,

    pub dropoff: String,

    /// Fare in Pi
    #[serde(default)]
    pub amount: f64,

    pub status: DeliveryStatus,

    /// Route length in kilometres
    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub completed_on_time: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_coords: Option<Coordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_coords: Option<Coordinates>,
}

impl Delivery {
    pub fn is_pending(&self) -> bool {
        self.status == DeliveryStatus::Pending
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Body of `POST /api/deliveries/:id/accept`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptDeliveryRequest {
    pub driver_id: String,
}

/// Body of `POST /api/deliveries/:id/complete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDeliveryRequest {
    pub driver_id: String,
    pub payment_id: String,
}
