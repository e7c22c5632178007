use gloo_timers::future::TimeoutFuture;
use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{add_review, validate_review};
use crate::components::star_rating::StarRating;
use crate::error::ApiError;
use crate::models::review::ReviewView;
use crate::supabase::Supabase;

const SUCCESS_NOTICE_MS: u32 = 4000;

/// Form for publishing a review of a renter. On success the new review is
/// handed to the parent so the list updates without a refetch.
#[component]
pub fn AddReviewForm(renter_id: String, on_review_added: Callback<ReviewView>) -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let renter_id = store_value(renter_id);

    let rating = create_rw_signal(0.0_f64);
    let comment = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);
    let success = create_rw_signal(None::<String>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let current_rating = rating.get_untracked();
        let current_comment = comment.get_untracked();
        if let Err(err) = validate_review(current_rating, &current_comment) {
            error.set(Some(err.user_message()));
            return;
        }

        let client = client.get_value();
        let renter_id = renter_id.get_value();
        submitting.set(true);
        error.set(None);
        success.set(None);
        spawn_local(async move {
            match add_review(&client, &renter_id, current_rating, &current_comment, None).await {
                Ok(review) => {
                    on_review_added.call(review);
                    rating.set(0.0);
                    comment.set(String::new());
                    success.set(Some("Su reseña ha sido publicada exitosamente".to_string()));
                    submitting.set(false);
                    TimeoutFuture::new(SUCCESS_NOTICE_MS).await;
                    success.set(None);
                }
                Err(err @ (ApiError::Unauthenticated | ApiError::Validation(_))) => {
                    error.set(Some(err.user_message()));
                    submitting.set(false);
                }
                Err(err) => {
                    error!("[APP] review submit for {renter_id} failed: {err}");
                    error.set(Some("No se pudo enviar la reseña. Intente nuevamente.".to_string()));
                    submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="card add-review-form">
            <h3>{ "Agregar una reseña" }</h3>
            <form on:submit=handle_submit>
                <label class="field-label">{ "Calificación" }</label>
                <StarRating rating=rating />

                <label class="field-label" for="comment">{ "Comentario" }</label>
                <textarea
                    id="comment"
                    rows="4"
                    placeholder="Comparta su experiencia con este arrendatario..."
                    prop:value=move || comment.get()
                    on:input=move |e| comment.set(event_target_value(&e))
                ></textarea>
                <p class="field-hint">
                    { "Su reseña ayudará a otros anfitriones a tomar decisiones informadas." }
                </p>

                {move || error.get().map(|message| view! { <p class="notice-error">{message}</p> })}
                {move || success.get().map(|message| view! { <p class="notice-success">{message}</p> })}

                <button type="submit" class="btn btn-primary" prop:disabled=move || submitting.get()>
                    {move || if submitting.get() { "Enviando..." } else { "Publicar reseña" }}
                </button>
            </form>
        </div>
    }
}
