use serde::{Deserialize, Serialize};

use crate::models::rental::RentalView;
use crate::models::review::ReviewView;

/// Row shape of the `renters` table. Every column except the primary key
/// may be missing or null on badly seeded rows.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RenterRow {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u32>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    #[serde(deserialize_with = "crate::models::de_lenient_f64")]
    pub rating: Option<f64>,
    pub member_since: Option<String>,
    pub created_at: Option<String>,
}

/// Insert payload for the `renters` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRenter {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u32>,
    pub occupation: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub profile_picture: String,
    pub rating: f64,
}

/// Fully shaped renter profile as the UI consumes it: fallbacks applied,
/// dates formatted, reviews and rental history attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RenterDetails {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub occupation: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub profile_picture: String,
    pub rating: f64,
    pub review_count: usize,
    pub member_since: String,
    pub completed_rentals: usize,
    pub reviews: Vec<ReviewView>,
    pub rental_history: Vec<RentalView>,
}

impl RenterDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renter_row_tolerates_sparse_json() {
        let row: RenterRow = serde_json::from_str(r#"{"id": "r1"}"#).unwrap();
        assert_eq!(row.id, "r1");
        assert_eq!(row.first_name, None);
        assert_eq!(row.rating, None);
    }

    #[test]
    fn renter_row_accepts_a_stringly_rating() {
        let row: RenterRow =
            serde_json::from_str(r#"{"id": "r1", "rating": "4.33", "age": 27}"#).unwrap();
        assert_eq!(row.rating, Some(4.33));
        assert_eq!(row.age, Some(27));
    }

    #[test]
    fn full_name_trims_missing_parts() {
        let details = RenterDetails {
            id: "r1".into(),
            first_name: "Carlos".into(),
            last_name: String::new(),
            age: 0,
            occupation: String::new(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            profile_picture: String::new(),
            rating: 0.0,
            review_count: 0,
            member_since: String::new(),
            completed_rentals: 0,
            reviews: vec![],
            rental_history: vec![],
        };
        assert_eq!(details.full_name(), "Carlos");
    }
}
