use leptos::*;

/// Interactive five-star picker used by the review form. Hovering and
/// clicking both move the selection, so the choice previews live.
#[component]
pub fn StarRating(rating: RwSignal<f64>) -> impl IntoView {
    view! {
        <div class="star-rating">
            {(1..=5)
                .map(|star| {
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if (star as f64) <= rating.get() { "star filled" } else { "star" }
                            }
                            aria-label=format!("{star} de 5")
                            on:click=move |_| rating.set(star as f64)
                            on:mouseenter=move |_| rating.set(star as f64)
                        >
                            { "★" }
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
            <span class="star-rating-value">
                {move || {
                    let value = rating.get();
                    if value > 0.0 { format!("{} de 5", value as u8) } else { String::new() }
                }}
            </span>
        </div>
    }
}

/// Read-only star row for displaying an existing rating.
#[component]
pub fn Stars(rating: f64) -> impl IntoView {
    view! {
        <div class="stars" aria-label=format!("{rating} de 5")>
            {(0..5)
                .map(|i| {
                    let class = if (i as f64) < rating { "star filled" } else { "star" };
                    view! { <span class=class>{ "★" }</span> }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
