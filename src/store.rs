//! Seams between the data access layer and the hosted backend.
//!
//! The app talks to two external collaborators: a relational store
//! (PostgREST) and an auth provider (GoTrue). Both are behind traits so the
//! data access layer can be exercised against an in-memory backend in tests.
//! The app is single-threaded on both targets, so the futures here do not
//! need to be `Send`.

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, StoreError};
use crate::models::profile::{ProfileRow, ProfileUpsert};
use crate::models::rental::RentalRow;
use crate::models::renter::{NewRenter, RenterRow};
use crate::models::report::{NewReport, ReportRow};
use crate::models::review::{NewReview, ReviewRow};

/// The authenticated user as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// An access token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// What a sign-up attempt produced. Projects with email confirmation
/// enabled return a user but no session until the address is confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpOutcome {
    pub user_id: Option<String>,
    pub session: Option<Session>,
}

#[allow(async_fn_in_trait)]
pub trait DataStore {
    /// Id of any one renter, used by the landing page to pick a profile.
    async fn first_renter_id(&self) -> Result<Option<String>, StoreError>;

    async fn renter_by_id(&self, renter_id: &str) -> Result<Option<RenterRow>, StoreError>;

    /// All reviews for a renter, newest first.
    async fn reviews_for_renter(&self, renter_id: &str) -> Result<Vec<ReviewRow>, StoreError>;

    /// Just the rating column of every review for a renter. Null ratings
    /// come back as `0.0`.
    async fn review_ratings(&self, renter_id: &str) -> Result<Vec<f64>, StoreError>;

    /// All rentals for a renter, most recent start date first.
    async fn rentals_for_renter(&self, renter_id: &str) -> Result<Vec<RentalRow>, StoreError>;

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewRow, StoreError>;

    async fn set_renter_rating(&self, renter_id: &str, rating: f64) -> Result<(), StoreError>;

    async fn insert_report(&self, report: &NewReport) -> Result<ReportRow, StoreError>;

    async fn insert_renter(&self, renter: &NewRenter) -> Result<RenterRow, StoreError>;

    async fn profile_by_id(&self, user_id: &str) -> Result<Option<ProfileRow>, StoreError>;

    async fn upsert_profile(&self, profile: &ProfileUpsert) -> Result<(), StoreError>;
}

#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    fn current_session(&self) -> Option<Session>;

    fn current_user(&self) -> Option<AuthUser> {
        self.current_session().map(|session| session.user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn request_password_reset(&self, email: &str, redirect_to: &str)
        -> Result<(), AuthError>;

    /// Changes the password of the currently signed-in user.
    async fn update_password(&self, new_password: &str) -> Result<(), AuthError>;
}
