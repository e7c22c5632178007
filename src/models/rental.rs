use serde::Deserialize;

/// Row shape of the `rental_history` table.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RentalRow {
    pub id: Option<String>,
    pub renter_id: Option<String>,
    pub car_model: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// A rental as the UI consumes it, with the date range preformatted.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalView {
    pub id: String,
    pub car_model: String,
    pub dates: String,
    pub status: String,
}
