use leptos::*;

use crate::components::add_review_form::AddReviewForm;
use crate::components::renter_reviews::RenterReviews;
use crate::components::report_dialog::ReportDialog;
use crate::components::verified_info::VerifiedInfo;
use crate::components::whatsapp_dialog::WhatsAppDialog;
use crate::models::renter::RenterDetails;
use crate::models::review::ReviewView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileTab {
    Reviews,
    History,
}

/// Full renter profile: identity card, verified data, personal details
/// and the reviews/rental-history tabs. Purely presentational; loading
/// and errors are handled by the page that owns the data.
#[component]
pub fn RenterProfile(details: RenterDetails, on_review_added: Callback<ReviewView>) -> impl IntoView {
    let full_name = details.full_name();
    let review_count = details.review_count;
    let completed_rentals = details.completed_rentals;
    let details = store_value(details);

    let tab = create_rw_signal(ProfileTab::Reviews);

    view! {
        <div class="renter-details">
            <h1>{ "Detalles del Arrendatario" }</h1>

            <div class="profile-grid">
                <div class="profile-side">
                    <div class="card profile-card">
                        <img
                            class="portrait"
                            src=details.with_value(|d| d.profile_picture.clone())
                            alt=details.with_value(|d| d.first_name.clone())
                        />
                        <h2>{ full_name.clone() }</h2>
                        <div class="rating-line">
                            <span class="star filled">{ "★" }</span>
                            <span class="rating-value">
                                { details.with_value(|d| format!("{:.1}", d.rating)) }
                            </span>
                            <span class="muted">{ format!("({review_count} reseñas)") }</span>
                        </div>
                        <span class="badge badge-verified">{ "Verificado" }</span>
                        <ReportDialog
                            renter_id=details.with_value(|d| d.id.clone())
                            renter_name=full_name.clone()
                        />
                    </div>

                    <VerifiedInfo name=details.with_value(|d| d.first_name.clone()) />
                </div>

                <div class="card personal-info">
                    <h3>{ "Información Personal" }</h3>
                    <dl>
                        <div class="info-row">
                            <dt>{ "Ocupación" }</dt>
                            <dd>{ details.with_value(|d| d.occupation.clone()) }</dd>
                        </div>
                        <div class="info-row">
                            <dt>{ "Edad" }</dt>
                            <dd>{ details.with_value(|d| format!("{} años", d.age)) }</dd>
                        </div>
                        <div class="info-row">
                            <dt>{ "Dirección" }</dt>
                            <dd>{ details.with_value(|d| d.address.clone()) }</dd>
                        </div>
                        <div class="info-row">
                            <dt>{ "Correo Electrónico" }</dt>
                            <dd>{ details.with_value(|d| d.email.clone()) }</dd>
                        </div>
                        <div class="info-row">
                            <dt>{ "Contacto" }</dt>
                            <dd>
                                <WhatsAppDialog
                                    phone=details.with_value(|d| d.phone.clone())
                                    renter_name=full_name.clone()
                                />
                            </dd>
                        </div>
                        <div class="info-row">
                            <dt>{ "Miembro desde" }</dt>
                            <dd>{ details.with_value(|d| d.member_since.clone()) }</dd>
                        </div>
                    </dl>
                </div>
            </div>

            <div class="tabs">
                <div class="tab-list">
                    <button
                        type="button"
                        class=move || {
                            if tab.get() == ProfileTab::Reviews { "tab active" } else { "tab" }
                        }
                        on:click=move |_| tab.set(ProfileTab::Reviews)
                    >
                        { format!("Reseñas ({review_count})") }
                    </button>
                    <button
                        type="button"
                        class=move || {
                            if tab.get() == ProfileTab::History { "tab active" } else { "tab" }
                        }
                        on:click=move |_| tab.set(ProfileTab::History)
                    >
                        { "Historial de Alquileres" }
                    </button>
                </div>

                {move || match tab.get() {
                    ProfileTab::Reviews => view! {
                        <div class="tab-content">
                            <AddReviewForm
                                renter_id=details.with_value(|d| d.id.clone())
                                on_review_added=on_review_added
                            />
                            <div class="card">
                                <h3>{ "Reseñas de Otros Anfitriones" }</h3>
                                <RenterReviews reviews=details.with_value(|d| d.reviews.clone()) />
                            </div>
                        </div>
                    }
                    .into_view(),
                    ProfileTab::History => view! {
                        <div class="tab-content">
                            <div class="card">
                                <h3>{ "Historial de Alquileres" }</h3>
                                <p class="muted">
                                    { format!(
                                        "El arrendatario ha completado {completed_rentals} alquileres en nuestra plataforma."
                                    ) }
                                </p>
                                {details.with_value(|d| {
                                    if d.rental_history.is_empty() {
                                        view! {
                                            <p class="muted">
                                                { "No hay historial de alquileres disponible." }
                                            </p>
                                        }
                                        .into_view()
                                    } else {
                                        d.rental_history
                                            .iter()
                                            .map(|rental| {
                                                let badge_class = if rental.status == "Completado" {
                                                    "badge"
                                                } else {
                                                    "badge badge-muted"
                                                };
                                                view! {
                                                    <div class="rental-card">
                                                        <div>
                                                            <h4>{ rental.car_model.clone() }</h4>
                                                            <p class="muted">{ rental.dates.clone() }</p>
                                                        </div>
                                                        <span class=badge_class>{ rental.status.clone() }</span>
                                                    </div>
                                                }
                                            })
                                            .collect::<Vec<_>>()
                                            .into_view()
                                    }
                                })}
                            </div>
                        </div>
                    }
                    .into_view(),
                }}
            </div>
        </div>
    }
}
