use leptos::*;

/// Checklist of the data the platform has confirmed for a renter.
#[component]
pub fn VerifiedInfo(name: String) -> impl IntoView {
    let items = ["Identidad", "Dirección de correo electrónico", "Número de teléfono"];

    view! {
        <div class="card verified-info">
            <h3>{ format!("Información confirmada de {name}") }</h3>
            <ul>
                {items
                    .iter()
                    .map(|item| {
                        view! {
                            <li>
                                <span class="check">{ "✓" }</span>
                                { item.to_string() }
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
            <a href="#" class="verified-info-link">
                { "Más información sobre la verificación de identidad" }
            </a>
        </div>
    }
}
