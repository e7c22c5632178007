use leptos::*;

/// wa.me link for a renter, with the REDIBO greeting prefilled. Returns
/// None when the stored phone has no digits at all (for example the
/// "No especificado" placeholder).
pub fn whatsapp_link(phone: &str, renter_name: &str) -> Option<String> {
    let normalized: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let message = format!("Hola {renter_name}, te contacto desde REDIBO sobre el alquiler de auto.");
    Some(format!(
        "https://wa.me/{normalized}?text={}",
        urlencoding::encode(&message)
    ))
}

/// Contact-by-WhatsApp button with a confirmation dialog.
#[component]
pub fn WhatsAppDialog(phone: String, renter_name: String) -> impl IntoView {
    let open = create_rw_signal(false);
    let link = whatsapp_link(&phone, &renter_name);
    let display_phone = phone.clone();

    view! {
        <div class="whatsapp-dialog">
            <button type="button" class="btn btn-whatsapp" on:click=move |_| open.set(true)>
                { "Contactar por WhatsApp" }
            </button>
            <Show when=move || open.get()>
                <div class="dialog-backdrop" on:click=move |_| open.set(false)></div>
                <div class="dialog" role="dialog">
                    <h3>{ "Contactar por WhatsApp" }</h3>
                    {match link.clone() {
                        Some(url) => view! {
                            <div class="dialog-body">
                                <p>
                                    { format!(
                                        "Abre una conversación de WhatsApp con {} al {}.",
                                        renter_name.clone(),
                                        display_phone.clone(),
                                    ) }
                                </p>
                                <a
                                    class="btn btn-whatsapp"
                                    href=url
                                    target="_blank"
                                    rel="noopener noreferrer"
                                >
                                    { "Abrir WhatsApp" }
                                </a>
                            </div>
                        }.into_view(),
                        None => view! {
                            <div class="dialog-body">
                                <p>{ "Este arrendatario no tiene un número de teléfono registrado." }</p>
                            </div>
                        }.into_view(),
                    }}
                    <div class="dialog-footer">
                        <button type="button" class="btn" on:click=move |_| open.set(false)>
                            { "Cerrar" }
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::whatsapp_link;

    #[test]
    fn link_keeps_digits_and_plus_and_encodes_the_greeting() {
        let url = whatsapp_link("+591 700-12345", "Carlos Mendoza").unwrap();
        assert!(url.starts_with("https://wa.me/+59170012345?text="));
        assert!(url.contains("Hola%20Carlos%20Mendoza"));
        assert!(url.contains("REDIBO"));
    }

    #[test]
    fn link_requires_at_least_one_digit() {
        assert_eq!(whatsapp_link("No especificado", "Carlos"), None);
        assert_eq!(whatsapp_link("", "Carlos"), None);
        assert_eq!(whatsapp_link("+", "Carlos"), None);
    }
}
