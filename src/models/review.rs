use serde::{Deserialize, Serialize};

/// Row shape of the `reviews` table.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ReviewRow {
    pub id: Option<String>,
    pub renter_id: Option<String>,
    pub host_id: Option<String>,
    pub host_name: Option<String>,
    pub host_picture: Option<String>,
    #[serde(deserialize_with = "crate::models::de_lenient_f64")]
    pub rating: Option<f64>,
    pub comment: Option<String>,
    pub created_at: Option<String>,
}

/// Insert payload for the `reviews` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub renter_id: String,
    pub host_id: String,
    pub host_name: String,
    pub host_picture: String,
    pub rating: f64,
    pub comment: String,
}

/// A review as the UI consumes it, with host fallbacks applied and the
/// creation date preformatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewView {
    pub id: String,
    pub host_id: String,
    pub host_name: String,
    pub host_picture: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: String,
    pub date: String,
}
