//! In-memory stand-in for the hosted store and auth provider, with
//! switchable failures for exercising the error paths.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use rentscore::error::{AuthError, StoreError};
use rentscore::models::profile::{ProfileRow, ProfileUpsert};
use rentscore::models::rental::RentalRow;
use rentscore::models::renter::{NewRenter, RenterRow};
use rentscore::models::report::{NewReport, ReportRow};
use rentscore::models::review::{NewReview, ReviewRow};
use rentscore::store::{AuthProvider, AuthUser, DataStore, Session, SignUpOutcome};

#[derive(Default)]
pub struct FakeBackend {
    pub renters: RefCell<Vec<RenterRow>>,
    pub reviews: RefCell<Vec<ReviewRow>>,
    pub rentals: RefCell<Vec<RentalRow>>,
    pub reports: RefCell<Vec<ReportRow>>,
    pub profiles: RefCell<HashMap<String, ProfileRow>>,
    session: RefCell<Option<Session>>,

    pub fail_renters: Cell<bool>,
    pub fail_reviews: Cell<bool>,
    pub fail_rentals: Cell<bool>,
    pub fail_profiles: Cell<bool>,
    /// How many upcoming rating writes should be rejected.
    pub fail_rating_updates: Cell<u32>,

    next_id: Cell<u32>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_renter(&self, id: &str, first_name: &str, last_name: &str) {
        self.renters.borrow_mut().push(RenterRow {
            id: id.to_string(),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            age: Some(30),
            occupation: Some("Ingeniero".to_string()),
            address: Some("Av. América 123, Cochabamba".to_string()),
            email: Some(format!("{}@ejemplo.com", first_name.to_lowercase())),
            phone: Some("+591 70012345".to_string()),
            profile_picture: Some("/fotos/carlos.jpg".to_string()),
            rating: Some(0.0),
            member_since: Some("2024-01-15T00:00:00Z".to_string()),
            created_at: None,
        });
    }

    pub fn seed_review(&self, renter_id: &str, rating: f64, created_at: &str) {
        let n = self.mint();
        self.reviews.borrow_mut().push(ReviewRow {
            id: Some(format!("rev-{n}")),
            renter_id: Some(renter_id.to_string()),
            host_id: Some(format!("host-{n}")),
            host_name: Some("Laura Méndez".to_string()),
            host_picture: Some("/fotos/laura.jpg".to_string()),
            rating: Some(rating),
            comment: Some("Muy buena experiencia con el arrendatario.".to_string()),
            created_at: Some(created_at.to_string()),
        });
    }

    pub fn seed_rental(&self, renter_id: &str, car_model: &str) {
        let n = self.mint();
        self.rentals.borrow_mut().push(RentalRow {
            id: Some(format!("ren-{n}")),
            renter_id: Some(renter_id.to_string()),
            car_model: Some(car_model.to_string()),
            start_date: Some("2025-01-03".to_string()),
            end_date: Some("2025-01-10".to_string()),
            status: Some("Completado".to_string()),
            created_at: None,
        });
    }

    pub fn seed_profile(&self, user_id: &str, full_name: &str) {
        self.profiles.borrow_mut().insert(
            user_id.to_string(),
            ProfileRow {
                id: user_id.to_string(),
                full_name: Some(full_name.to_string()),
                avatar_url: Some("/fotos/avatar.jpg".to_string()),
                updated_at: None,
            },
        );
    }

    pub fn sign_in_as(&self, user_id: &str, email: &str) {
        *self.session.borrow_mut() = Some(Session {
            access_token: format!("token-{user_id}"),
            refresh_token: None,
            user: AuthUser {
                id: user_id.to_string(),
                email: Some(email.to_string()),
                full_name: None,
            },
        });
    }

    pub fn renter_rating(&self, renter_id: &str) -> Option<f64> {
        self.renters
            .borrow()
            .iter()
            .find(|r| r.id == renter_id)
            .and_then(|r| r.rating)
    }

    pub fn review_count(&self, renter_id: &str) -> usize {
        self.reviews
            .borrow()
            .iter()
            .filter(|r| r.renter_id.as_deref() == Some(renter_id))
            .count()
    }

    fn mint(&self) -> u32 {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        n
    }

    fn rejected(what: &str) -> StoreError {
        StoreError::Rejected {
            status: 500,
            message: format!("simulated {what} failure"),
        }
    }
}

impl DataStore for FakeBackend {
    async fn first_renter_id(&self) -> Result<Option<String>, StoreError> {
        if self.fail_renters.get() {
            return Err(Self::rejected("renters"));
        }
        Ok(self.renters.borrow().first().map(|r| r.id.clone()))
    }

    async fn renter_by_id(&self, renter_id: &str) -> Result<Option<RenterRow>, StoreError> {
        if self.fail_renters.get() {
            return Err(Self::rejected("renters"));
        }
        Ok(self
            .renters
            .borrow()
            .iter()
            .find(|r| r.id == renter_id)
            .cloned())
    }

    async fn reviews_for_renter(&self, renter_id: &str) -> Result<Vec<ReviewRow>, StoreError> {
        if self.fail_reviews.get() {
            return Err(Self::rejected("reviews"));
        }
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|r| r.renter_id.as_deref() == Some(renter_id))
            .cloned()
            .collect())
    }

    async fn review_ratings(&self, renter_id: &str) -> Result<Vec<f64>, StoreError> {
        if self.fail_reviews.get() {
            return Err(Self::rejected("reviews"));
        }
        Ok(self
            .reviews
            .borrow()
            .iter()
            .filter(|r| r.renter_id.as_deref() == Some(renter_id))
            .map(|r| r.rating.unwrap_or(0.0))
            .collect())
    }

    async fn rentals_for_renter(&self, renter_id: &str) -> Result<Vec<RentalRow>, StoreError> {
        if self.fail_rentals.get() {
            return Err(Self::rejected("rentals"));
        }
        Ok(self
            .rentals
            .borrow()
            .iter()
            .filter(|r| r.renter_id.as_deref() == Some(renter_id))
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewRow, StoreError> {
        let n = self.mint();
        let row = ReviewRow {
            id: Some(format!("rev-{n}")),
            renter_id: Some(review.renter_id.clone()),
            host_id: Some(review.host_id.clone()),
            host_name: Some(review.host_name.clone()),
            host_picture: Some(review.host_picture.clone()),
            rating: Some(review.rating),
            created_at: Some(format!("2024-06-{:02}T12:00:00Z", n.min(28))),
            comment: Some(review.comment.clone()),
        };
        self.reviews.borrow_mut().push(row.clone());
        Ok(row)
    }

    async fn set_renter_rating(&self, renter_id: &str, rating: f64) -> Result<(), StoreError> {
        let pending = self.fail_rating_updates.get();
        if pending > 0 {
            self.fail_rating_updates.set(pending - 1);
            return Err(Self::rejected("rating update"));
        }
        let mut renters = self.renters.borrow_mut();
        if let Some(renter) = renters.iter_mut().find(|r| r.id == renter_id) {
            renter.rating = Some(rating);
        }
        Ok(())
    }

    async fn insert_report(&self, report: &NewReport) -> Result<ReportRow, StoreError> {
        let n = self.mint();
        let row = ReportRow {
            id: Some(format!("rep-{n}")),
            renter_id: Some(report.renter_id.clone()),
            reporter_id: Some(report.reporter_id.clone()),
            reason: Some(report.reason.clone()),
            additional_info: Some(report.additional_info.clone()),
            status: Some(report.status.clone()),
            created_at: None,
        };
        self.reports.borrow_mut().push(row.clone());
        Ok(row)
    }

    async fn insert_renter(&self, renter: &NewRenter) -> Result<RenterRow, StoreError> {
        let n = self.mint();
        let row = RenterRow {
            id: format!("renter-{n}"),
            first_name: Some(renter.first_name.clone()),
            last_name: Some(renter.last_name.clone()),
            age: renter.age,
            occupation: Some(renter.occupation.clone()),
            address: Some(renter.address.clone()),
            email: Some(renter.email.clone()),
            phone: Some(renter.phone.clone()),
            profile_picture: Some(renter.profile_picture.clone()),
            rating: Some(renter.rating),
            member_since: Some("2025-03-01T00:00:00Z".to_string()),
            created_at: None,
        };
        self.renters.borrow_mut().push(row.clone());
        Ok(row)
    }

    async fn profile_by_id(&self, user_id: &str) -> Result<Option<ProfileRow>, StoreError> {
        if self.fail_profiles.get() {
            return Err(Self::rejected("profiles"));
        }
        Ok(self.profiles.borrow().get(user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &ProfileUpsert) -> Result<(), StoreError> {
        if self.fail_profiles.get() {
            return Err(Self::rejected("profiles"));
        }
        self.profiles.borrow_mut().insert(
            profile.id.clone(),
            ProfileRow {
                id: profile.id.clone(),
                full_name: Some(profile.full_name.clone()),
                avatar_url: None,
                updated_at: Some(profile.updated_at.clone()),
            },
        );
        Ok(())
    }
}

impl AuthProvider for FakeBackend {
    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        let n = self.mint();
        let session = Session {
            access_token: format!("token-{n}"),
            refresh_token: None,
            user: AuthUser {
                id: format!("user-{n}"),
                email: Some(email.to_string()),
                full_name: None,
            },
        };
        *self.session.borrow_mut() = Some(session.clone());
        Ok(session)
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _full_name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let n = self.mint();
        Ok(SignUpOutcome {
            user_id: Some(format!("user-{n}")),
            session: None,
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.session.borrow_mut() = None;
        Ok(())
    }

    async fn request_password_reset(
        &self,
        _email: &str,
        _redirect_to: &str,
    ) -> Result<(), AuthError> {
        Ok(())
    }

    async fn update_password(&self, _new_password: &str) -> Result<(), AuthError> {
        if self.session.borrow().is_none() {
            return Err(AuthError::NotSignedIn);
        }
        Ok(())
    }
}
