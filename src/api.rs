//! Data access layer. Components call these functions instead of talking
//! to the store directly: they validate input, check the session, apply
//! the presentation fallbacks and keep the renter's aggregate rating in
//! step with the reviews table.

use chrono::{SecondsFormat, Utc};
use leptos::logging::{error, log, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::fallback::{
    format_date, format_date_range, non_blank, text_or, AVATAR_PLACEHOLDER, PORTRAIT_PLACEHOLDER,
    UNKNOWN_ADDRESS, UNKNOWN_HOST, UNKNOWN_OCCUPATION, UNKNOWN_PHONE, UNKNOWN_STATUS,
    UNKNOWN_USER, UNKNOWN_VEHICLE,
};
use crate::models::rental::{RentalRow, RentalView};
use crate::models::renter::{NewRenter, RenterDetails, RenterRow};
use crate::models::report::{NewReport, ReportReason, ReportRow, REPORT_STATUS_PENDING};
use crate::models::review::{NewReview, ReviewRow, ReviewView};
use crate::store::{AuthProvider, AuthUser, DataStore};

/// Identity a review is published under. Normally derived from the
/// signed-in user's profile; tests and imports can pass one explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct HostIdentity {
    pub host_id: String,
    pub host_name: String,
    pub host_picture: String,
}

/// Form input for a new renter profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRenterInput {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u32>,
    pub occupation: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// Id of any renter, for the landing page. Lookup problems are logged and
/// reported as "none found" so the page can show its empty state.
pub async fn get_first_renter_id<S: DataStore>(store: &S) -> Option<String> {
    match store.first_renter_id().await {
        Ok(id) => id,
        Err(err) => {
            warn!("[API] first renter lookup failed: {err}");
            None
        }
    }
}

/// Loads a renter's profile, reviews and rental history, and shapes them
/// for display. The two lists are independent queries and run
/// concurrently once the profile row is in hand.
pub async fn fetch_renter_details<S: DataStore>(
    store: &S,
    renter_id: &str,
) -> Result<RenterDetails, ApiError> {
    let renter = store
        .renter_by_id(renter_id)
        .await?
        .ok_or_else(|| ApiError::RenterNotFound(renter_id.to_string()))?;

    let (reviews, rentals) = futures::join!(
        store.reviews_for_renter(renter_id),
        store.rentals_for_renter(renter_id),
    );
    let reviews: Vec<ReviewView> = reviews?.into_iter().map(shape_review).collect();
    let rental_history: Vec<RentalView> = rentals?.into_iter().map(shape_rental).collect();

    log!(
        "[API] renter {renter_id} loaded with {} reviews and {} rentals",
        reviews.len(),
        rental_history.len()
    );
    Ok(shape_renter(renter, reviews, rental_history))
}

/// Publishes a review for a renter and refreshes the renter's aggregate
/// rating. Requires a signed-in user; when no host identity is supplied
/// it is derived from the user's profile.
pub async fn add_review<C>(
    client: &C,
    renter_id: &str,
    rating: f64,
    comment: &str,
    host: Option<HostIdentity>,
) -> Result<ReviewView, ApiError>
where
    C: DataStore + AuthProvider,
{
    validate_review(rating, comment)?;

    let user = client.current_user().ok_or(ApiError::Unauthenticated)?;
    let host = match host {
        Some(host) => host,
        None => resolve_host_identity(client, &user).await,
    };
    log!("[API] submitting review for renter {renter_id} as {}", host.host_name);

    let review = NewReview {
        renter_id: renter_id.to_string(),
        host_id: host.host_id,
        host_name: host.host_name,
        host_picture: host.host_picture,
        rating,
        comment: comment.to_string(),
    };
    let row = client.insert_review(&review).await?;
    refresh_renter_rating(client, renter_id).await;
    Ok(shape_review(row))
}

/// Review input rules, checked again here so no form can skip them:
/// a rating between 1 and 5, and a comment of at least 10 characters
/// once trimmed.
pub fn validate_review(rating: f64, comment: &str) -> Result<(), ApiError> {
    if !(1.0..=5.0).contains(&rating) {
        return Err(ApiError::Validation(
            "Por favor, seleccione una calificación".to_string(),
        ));
    }
    if comment.trim().chars().count() < 10 {
        return Err(ApiError::Validation(
            "El comentario debe tener al menos 10 caracteres".to_string(),
        ));
    }
    Ok(())
}

/// Recomputes a renter's rating as the mean of all their review ratings,
/// rounded to two decimals (0.0 when there are none), and writes it back.
/// Returns the stored value.
pub async fn update_renter_rating<S: DataStore>(
    store: &S,
    renter_id: &str,
) -> Result<f64, ApiError> {
    let ratings = store.review_ratings(renter_id).await?;
    let rating = round2(average(&ratings));
    store.set_renter_rating(renter_id, rating).await?;
    log!("[API] renter {renter_id} rating set to {rating} over {} reviews", ratings.len());
    Ok(rating)
}

/// Files a report against a renter. Requires a signed-in user, who is
/// recorded as the reporter; new reports always start out pending.
pub async fn report_renter<C>(
    client: &C,
    renter_id: &str,
    reason: ReportReason,
    additional_info: &str,
) -> Result<ReportRow, ApiError>
where
    C: DataStore + AuthProvider,
{
    let user = client.current_user().ok_or(ApiError::Unauthenticated)?;
    let report = NewReport {
        renter_id: renter_id.to_string(),
        reporter_id: user.id,
        reason: reason.code().to_string(),
        additional_info: additional_info.trim().to_string(),
        status: REPORT_STATUS_PENDING.to_string(),
    };
    let row = client.insert_report(&report).await?;
    log!(
        "[API] report {} filed against renter {renter_id}",
        row.id.as_deref().unwrap_or("<sin id>")
    );
    Ok(row)
}

/// Creates a renter profile from the add-renter form. First name, last
/// name and email are mandatory; new profiles start unrated with the
/// placeholder portrait.
pub async fn create_renter<S: DataStore>(
    store: &S,
    input: NewRenterInput,
) -> Result<RenterRow, ApiError> {
    if input.first_name.trim().is_empty()
        || input.last_name.trim().is_empty()
        || input.email.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "Por favor complete los campos obligatorios".to_string(),
        ));
    }
    let renter = NewRenter {
        first_name: input.first_name,
        last_name: input.last_name,
        age: input.age,
        occupation: input.occupation,
        address: input.address,
        email: input.email,
        phone: input.phone,
        profile_picture: PORTRAIT_PLACEHOLDER.to_string(),
        rating: 0.0,
    };
    let row = store.insert_renter(&renter).await?;
    log!("[API] renter {} created", row.id);
    Ok(row)
}

/// Mean of the ratings; an empty set averages to 0.0.
pub fn average(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

/// Rounds half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The aggregate write is best-effort: the review already exists, and the
/// next successful update recomputes the mean over all reviews anyway.
/// One retry covers transient failures; after that we log and move on.
async fn refresh_renter_rating<S: DataStore>(store: &S, renter_id: &str) {
    for attempt in 1..=2 {
        match update_renter_rating(store, renter_id).await {
            Ok(_) => return,
            Err(err) if attempt == 1 => {
                warn!("[API] rating refresh for {renter_id} failed, retrying: {err}");
            }
            Err(err) => {
                error!("[API] rating refresh for {renter_id} failed after retry, aggregate stays stale until the next review: {err}");
            }
        }
    }
}

/// Display identity for the signed-in user: the profile's name and
/// avatar when available, else the local part of their email, else the
/// generic fallback. Profile problems degrade instead of failing, so a
/// missing profiles row never blocks a review.
async fn resolve_host_identity<S: DataStore>(store: &S, user: &AuthUser) -> HostIdentity {
    let profile = match store.profile_by_id(&user.id).await {
        Ok(profile) => profile,
        Err(err) => {
            warn!("[API] profile lookup for {} failed: {err}", user.id);
            None
        }
    };

    let email_name = user
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let host_name = profile
        .as_ref()
        .and_then(|profile| non_blank(profile.full_name.clone()))
        .or(email_name)
        .unwrap_or_else(|| UNKNOWN_USER.to_string());
    let host_picture = profile
        .and_then(|profile| non_blank(profile.avatar_url))
        .unwrap_or_else(|| AVATAR_PLACEHOLDER.to_string());

    HostIdentity {
        host_id: user.id.clone(),
        host_name,
        host_picture,
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn shape_review(row: ReviewRow) -> ReviewView {
    let created_at = non_blank(row.created_at).unwrap_or_else(now_iso);
    ReviewView {
        id: row.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        host_id: row.host_id.unwrap_or_default(),
        host_name: text_or(row.host_name, UNKNOWN_HOST),
        host_picture: text_or(row.host_picture, AVATAR_PLACEHOLDER),
        rating: row.rating.unwrap_or(0.0),
        comment: row.comment.unwrap_or_default(),
        date: format_date(&created_at),
        created_at,
    }
}

fn shape_rental(row: RentalRow) -> RentalView {
    RentalView {
        id: row.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        car_model: text_or(row.car_model, UNKNOWN_VEHICLE),
        dates: format_date_range(
            row.start_date.as_deref().unwrap_or_default(),
            row.end_date.as_deref().unwrap_or_default(),
        ),
        status: text_or(row.status, UNKNOWN_STATUS),
    }
}

fn shape_renter(
    row: RenterRow,
    reviews: Vec<ReviewView>,
    rental_history: Vec<RentalView>,
) -> RenterDetails {
    RenterDetails {
        id: row.id,
        first_name: row.first_name.unwrap_or_default(),
        last_name: row.last_name.unwrap_or_default(),
        age: row.age.unwrap_or(0),
        occupation: text_or(row.occupation, UNKNOWN_OCCUPATION),
        address: text_or(row.address, UNKNOWN_ADDRESS),
        email: row.email.unwrap_or_default(),
        phone: text_or(row.phone, UNKNOWN_PHONE),
        profile_picture: text_or(row.profile_picture, PORTRAIT_PLACEHOLDER),
        rating: row.rating.unwrap_or(0.0),
        review_count: reviews.len(),
        member_since: format_date(row.member_since.as_deref().unwrap_or_default()),
        completed_rentals: rental_history.len(),
        reviews,
        rental_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fallback::{UNKNOWN_DATE, UNKNOWN_DATE_RANGE};

    #[test]
    fn average_of_no_ratings_is_zero() {
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        assert_eq!(round2(average(&[5.0, 4.0, 3.0])), 4.0);
        assert_eq!(round2(average(&[5.0, 4.0])), 4.5);
        assert_eq!(round2(average(&[5.0, 5.0, 4.0])), 4.67);
        assert_eq!(round2(average(&[1.0, 2.0, 2.0])), 1.67);
    }

    #[test]
    fn rounding_is_idempotent() {
        for value in [0.0, 1.671, 3.333_333, 4.005, 4.67] {
            assert_eq!(round2(round2(value)), round2(value));
        }
    }

    #[test]
    fn review_validation_rejects_out_of_range_ratings() {
        let comment = "Todo excelente, muy recomendable.";
        assert!(validate_review(0.0, comment).is_err());
        assert!(validate_review(5.5, comment).is_err());
        assert!(validate_review(1.0, comment).is_ok());
        assert!(validate_review(5.0, comment).is_ok());
    }

    #[test]
    fn review_validation_requires_ten_characters_after_trimming() {
        assert!(validate_review(4.0, "   corto   ").is_err());
        assert!(validate_review(4.0, "123456789").is_err());
        assert!(validate_review(4.0, "1234567890").is_ok());
    }

    #[test]
    fn shaped_reviews_fall_back_to_generic_host_fields() {
        let view = shape_review(ReviewRow {
            rating: Some(4.0),
            created_at: Some("2024-05-12T10:30:00Z".into()),
            ..Default::default()
        });
        assert_eq!(view.host_name, "Anfitrión");
        assert_eq!(view.host_picture, "/placeholder.svg?height=40&width=40");
        assert_eq!(view.date, "12 de mayo de 2024");
        assert!(!view.id.is_empty());
    }

    #[test]
    fn shaped_reviews_without_a_date_get_a_current_one() {
        let view = shape_review(ReviewRow {
            created_at: None,
            ..Default::default()
        });
        assert!(!view.created_at.is_empty());
        assert_ne!(view.date, UNKNOWN_DATE);
    }

    #[test]
    fn shaped_rentals_format_their_date_range() {
        let view = shape_rental(RentalRow {
            id: Some("t1".into()),
            car_model: Some("Toyota Corolla".into()),
            start_date: Some("2025-01-03".into()),
            end_date: Some("2025-01-10".into()),
            status: Some("Completado".into()),
            ..Default::default()
        });
        assert_eq!(view.dates, "3 enero - 10 enero, 2025");
        assert_eq!(view.status, "Completado");
    }

    #[test]
    fn shaped_rentals_fall_back_when_fields_are_missing() {
        let view = shape_rental(RentalRow::default());
        assert_eq!(view.car_model, "Vehículo desconocido");
        assert_eq!(view.dates, UNKNOWN_DATE_RANGE);
        assert_eq!(view.status, "Desconocido");
    }

    #[test]
    fn shaped_renters_apply_the_field_fallbacks() {
        let details = shape_renter(
            RenterRow {
                id: "r1".into(),
                first_name: Some("Carlos".into()),
                phone: Some("  ".into()),
                ..Default::default()
            },
            vec![],
            vec![],
        );
        assert_eq!(details.first_name, "Carlos");
        assert_eq!(details.last_name, "");
        assert_eq!(details.age, 0);
        assert_eq!(details.occupation, "No especificada");
        assert_eq!(details.address, "No especificada");
        assert_eq!(details.phone, "No especificado");
        assert_eq!(details.profile_picture, "/placeholder.svg?height=200&width=200");
        assert_eq!(details.rating, 0.0);
        assert_eq!(details.member_since, UNKNOWN_DATE);
    }

    #[test]
    fn review_and_rental_counts_come_from_the_lists() {
        let review = shape_review(ReviewRow {
            id: Some("v1".into()),
            ..Default::default()
        });
        let rental = shape_rental(RentalRow {
            id: Some("t1".into()),
            ..Default::default()
        });
        let details = shape_renter(
            RenterRow {
                id: "r1".into(),
                ..Default::default()
            },
            vec![review.clone(), review],
            vec![rental],
        );
        assert_eq!(details.review_count, 2);
        assert_eq!(details.completed_rentals, 1);
    }
}
