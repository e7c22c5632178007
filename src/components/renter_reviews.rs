use leptos::*;

use crate::components::star_rating::Stars;
use crate::models::review::ReviewView;
use crate::reviews::{
    filter_and_sort, has_hidden_reviews, visible_count, RatingFilter, SortOrder,
    INITIAL_VISIBLE_REVIEWS,
};

/// Review list with star filtering, date ordering and a collapsed view
/// that shows the first two reviews until expanded.
#[component]
pub fn RenterReviews(reviews: Vec<ReviewView>) -> impl IntoView {
    let total = reviews.len();
    let reviews = store_value(reviews);

    let expanded = create_rw_signal(false);
    let show_filters = create_rw_signal(false);
    let filter = create_rw_signal(RatingFilter::All);
    let order = create_rw_signal(SortOrder::Newest);

    let filtered = move || reviews.with_value(|all| filter_and_sort(all, filter.get(), order.get()));
    let has_active_filters =
        move || filter.get() != RatingFilter::All || order.get() != SortOrder::Newest;
    let reset_filters = move |_| {
        filter.set(RatingFilter::All);
        order.set(SortOrder::Newest);
    };

    if total == 0 {
        return view! {
            <p class="muted">{ "Este arrendatario aún no tiene reseñas." }</p>
        }
        .into_view();
    }

    view! {
        <div class="renter-reviews">
            <div class="filters-bar">
                <button
                    type="button"
                    class="btn btn-small"
                    on:click=move |_| show_filters.update(|shown| *shown = !*shown)
                >
                    { "Filtros" }
                    {move || {
                        has_active_filters()
                            .then(|| {
                                let mut badge = String::new();
                                if let RatingFilter::Stars(stars) = filter.get() {
                                    badge.push_str(&format!("{stars}★"));
                                }
                                if order.get() == SortOrder::Oldest {
                                    if !badge.is_empty() {
                                        badge.push_str(" · ");
                                    }
                                    badge.push_str("Antiguos");
                                }
                                view! { <span class="badge">{badge}</span> }
                            })
                    }}
                </button>
                {move || {
                    has_active_filters()
                        .then(|| {
                            view! {
                                <button type="button" class="btn btn-ghost btn-small" on:click=reset_filters>
                                    { "Limpiar filtros" }
                                </button>
                            }
                        })
                }}
            </div>

            <Show when=move || show_filters.get()>
                <div class="filters-panel">
                    <div class="filters-grid">
                        <div>
                            <label class="field-label" for="rating-filter">{ "Calificación" }</label>
                            <select
                                id="rating-filter"
                                prop:value=move || filter.get().code()
                                on:change=move |e| filter.set(RatingFilter::from_code(&event_target_value(&e)))
                            >
                                <option value="all">{ "Todas las calificaciones" }</option>
                                <option value="5">{ "5 estrellas" }</option>
                                <option value="4">{ "4 estrellas" }</option>
                                <option value="3">{ "3 estrellas" }</option>
                                <option value="2">{ "2 estrellas" }</option>
                                <option value="1">{ "1 estrella" }</option>
                            </select>
                        </div>
                        <div>
                            <label class="field-label" for="sort-order">{ "Ordenar por" }</label>
                            <select
                                id="sort-order"
                                prop:value=move || order.get().code()
                                on:change=move |e| order.set(SortOrder::from_code(&event_target_value(&e)))
                            >
                                <option value="newest">{ "Más recientes" }</option>
                                <option value="oldest">{ "Más antiguas" }</option>
                            </select>
                        </div>
                    </div>
                    <p class="filters-summary">
                        {move || {
                            let shown = filtered().len();
                            if shown == 0 {
                                "No se encontraron reseñas con estos filtros".to_string()
                            } else {
                                format!("Mostrando {shown} de {total} reseñas")
                            }
                        }}
                    </p>
                </div>
            </Show>

            {move || {
                let selected = filtered();
                if selected.is_empty() {
                    return view! {
                        <div class="reviews-empty">
                            <p class="muted">
                                { "No hay reseñas que coincidan con los filtros seleccionados." }
                            </p>
                            <button type="button" class="btn btn-small" on:click=reset_filters>
                                { "Limpiar filtros" }
                            </button>
                        </div>
                    }
                    .into_view();
                }

                let shown = visible_count(selected.len(), expanded.get());
                let hidden = selected.len().saturating_sub(INITIAL_VISIBLE_REVIEWS);
                let show_more = has_hidden_reviews(selected.len());
                let cards = selected
                    .into_iter()
                    .take(shown)
                    .map(|review| {
                        let shown_date = if review.date.is_empty() {
                            review.created_at.clone()
                        } else {
                            review.date.clone()
                        };
                        let comment = if review.comment.is_empty() {
                            "Sin comentarios".to_string()
                        } else {
                            review.comment.clone()
                        };
                        view! {
                            <div class="review-card">
                                <img
                                    class="avatar"
                                    src=review.host_picture.clone()
                                    alt=review.host_name.clone()
                                />
                                <div class="review-body">
                                    <div class="review-heading">
                                        <h4>{ review.host_name.clone() }</h4>
                                        <span class="muted">{ shown_date }</span>
                                    </div>
                                    <Stars rating=review.rating />
                                    <p>{ comment }</p>
                                </div>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>();

                view! {
                    <div class="reviews-list">
                        {cards}
                        {show_more
                            .then(|| {
                                view! {
                                    <button
                                        type="button"
                                        class="btn show-more"
                                        on:click=move |_| expanded.update(|open| *open = !*open)
                                    >
                                        {move || {
                                            if expanded.get() {
                                                "Mostrar menos".to_string()
                                            } else {
                                                format!("Ver más reseñas ({hidden})")
                                            }
                                        }}
                                    </button>
                                }
                            })}
                    </div>
                }
                .into_view()
            }}
        </div>
    }
    .into_view()
}
