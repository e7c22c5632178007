//! HTTP client for the hosted Supabase project. `mod.rs` covers the
//! PostgREST side, `auth` the GoTrue side, `query` the URL grammar.

pub mod auth;
pub mod query;

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::{create_rw_signal, RwSignal, SignalGetUntracked};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SupabaseConfig;
use crate::error::StoreError;
use crate::models::profile::{ProfileRow, ProfileUpsert};
use crate::models::rental::RentalRow;
use crate::models::renter::{NewRenter, RenterRow};
use crate::models::report::{NewReport, ReportRow};
use crate::models::review::{NewReview, ReviewRow};
use crate::store::{DataStore, Session};
use query::{mutation_url, Direction, TableQuery};

/// Handle on the remote project. Cloning is cheap; all clones share the
/// same session signal, which is provided once through context.
#[derive(Clone)]
pub struct Supabase {
    config: SupabaseConfig,
    session: RwSignal<Option<Session>>,
}

impl Supabase {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            session: create_rw_signal(None),
        }
    }

    /// Reactive view of the session, for UI that switches on sign-in state.
    pub fn session_signal(&self) -> RwSignal<Option<Session>> {
        self.session
    }

    /// Requests run under the user's token when signed in, and under the
    /// anon key otherwise; row level security sorts out the rest.
    fn bearer_token(&self) -> String {
        self.session
            .get_untracked()
            .map(|session| session.access_token)
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    fn with_auth_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", self.bearer_token()))
    }

    async fn select_rows<T: DeserializeOwned>(
        &self,
        query: TableQuery,
    ) -> Result<Vec<T>, StoreError> {
        let url = query.to_url(&self.config.rest_url());
        let response = self
            .with_auth_headers(Request::get(&url))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn insert_returning<B, T>(&self, table: &str, body: &B) -> Result<T, StoreError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = mutation_url(&self.config.rest_url(), table, &[]);
        let request = self
            .with_auth_headers(Request::post(&url))
            .header("Prefer", "return=representation")
            .json(body)
            .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        let mut rows: Vec<T> = read_json(response).await?;
        if rows.is_empty() {
            return Err(StoreError::EmptyReturn);
        }
        Ok(rows.remove(0))
    }

    async fn update_by_id<B: Serialize>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<(), StoreError> {
        let url = mutation_url(&self.config.rest_url(), table, &[("id", id)]);
        let request = self
            .with_auth_headers(Request::patch(&url))
            .header("Prefer", "return=minimal")
            .json(body)
            .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        ensure_ok(response).await
    }
}

impl DataStore for Supabase {
    async fn first_renter_id(&self) -> Result<Option<String>, StoreError> {
        #[derive(Deserialize)]
        struct IdRow {
            id: String,
        }
        let rows: Vec<IdRow> = self
            .select_rows(TableQuery::from("renters").select("id").limit(1))
            .await?;
        Ok(rows.into_iter().next().map(|row| row.id))
    }

    async fn renter_by_id(&self, renter_id: &str) -> Result<Option<RenterRow>, StoreError> {
        let rows: Vec<RenterRow> = self
            .select_rows(TableQuery::from("renters").eq("id", renter_id).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn reviews_for_renter(&self, renter_id: &str) -> Result<Vec<ReviewRow>, StoreError> {
        self.select_rows(
            TableQuery::from("reviews")
                .eq("renter_id", renter_id)
                .order("created_at", Direction::Descending),
        )
        .await
    }

    async fn review_ratings(&self, renter_id: &str) -> Result<Vec<f64>, StoreError> {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct RatingRow {
            #[serde(deserialize_with = "crate::models::de_lenient_f64")]
            rating: Option<f64>,
        }
        let rows: Vec<RatingRow> = self
            .select_rows(
                TableQuery::from("reviews")
                    .select("rating")
                    .eq("renter_id", renter_id),
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.rating.unwrap_or(0.0)).collect())
    }

    async fn rentals_for_renter(&self, renter_id: &str) -> Result<Vec<RentalRow>, StoreError> {
        self.select_rows(
            TableQuery::from("rental_history")
                .eq("renter_id", renter_id)
                .order("start_date", Direction::Descending),
        )
        .await
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewRow, StoreError> {
        self.insert_returning("reviews", review).await
    }

    async fn set_renter_rating(&self, renter_id: &str, rating: f64) -> Result<(), StoreError> {
        self.update_by_id("renters", renter_id, &serde_json::json!({ "rating": rating }))
            .await
    }

    async fn insert_report(&self, report: &NewReport) -> Result<ReportRow, StoreError> {
        self.insert_returning("reports", report).await
    }

    async fn insert_renter(&self, renter: &NewRenter) -> Result<RenterRow, StoreError> {
        self.insert_returning("renters", renter).await
    }

    async fn profile_by_id(&self, user_id: &str) -> Result<Option<ProfileRow>, StoreError> {
        let rows: Vec<ProfileRow> = self
            .select_rows(TableQuery::from("profiles").eq("id", user_id).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn upsert_profile(&self, profile: &ProfileUpsert) -> Result<(), StoreError> {
        // A POST with merge-duplicates is PostgREST's upsert.
        let url = mutation_url(&self.config.rest_url(), "profiles", &[]);
        let request = self
            .with_auth_headers(Request::post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(profile)
            .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        ensure_ok(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    if !response.ok() {
        return Err(rejection(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| StoreError::Decode(err.to_string()))
}

async fn ensure_ok(response: Response) -> Result<(), StoreError> {
    if response.ok() {
        Ok(())
    } else {
        Err(rejection(response).await)
    }
}

async fn rejection(response: Response) -> StoreError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    StoreError::Rejected { status, message }
}

fn network(err: gloo_net::Error) -> StoreError {
    StoreError::Network(err.to_string())
}
