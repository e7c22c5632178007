use serde::{Deserialize, Serialize};

/// Row shape of the `profiles` table, which mirrors the auth provider's
/// users and carries the display name hosts review under.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRow {
    pub id: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Option<String>,
}

/// Upsert payload written right after a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpsert {
    pub id: String,
    pub full_name: String,
    pub updated_at: String,
}
