use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::store::AuthProvider;
use crate::supabase::Supabase;

const INVALID_LINK: &str =
    "Enlace de recuperación inválido o expirado. Por favor, solicite uno nuevo.";

/// Sets a new password from a recovery link. The tokens arrive in the URL
/// fragment; until they are adopted as a session the form stays disabled.
#[component]
pub fn ResetPasswordForm() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let navigate = use_navigate();

    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let loading = create_rw_signal(false);
    let server_error = create_rw_signal(None::<String>);
    let session_valid = create_rw_signal(false);

    create_effect(move |_| {
        let client = client.get_value();
        spawn_local(async move {
            if client.adopt_recovery_session().await {
                session_valid.set(true);
            } else {
                server_error.set(Some(INVALID_LINK.to_string()));
            }
        });
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        if !session_valid.get_untracked() {
            server_error.set(Some(INVALID_LINK.to_string()));
            return;
        }
        let password_value = password.get_untracked();
        if password_value.chars().count() < 6 {
            server_error.set(Some("La contraseña debe tener al menos 6 caracteres".to_string()));
            return;
        }
        if password_value != confirm_password.get_untracked() {
            server_error.set(Some("Las contraseñas no coinciden".to_string()));
            return;
        }

        let client = client.get_value();
        let navigate = navigate.clone();
        loading.set(true);
        server_error.set(None);
        spawn_local(async move {
            match client.update_password(&password_value).await {
                Ok(()) => {
                    navigate("/login", Default::default());
                }
                Err(err) => {
                    server_error.set(Some(err.user_message()));
                    loading.set(false);
                }
            }
        });
    };

    let locked = move || loading.get() || !session_valid.get();

    view! {
        <form class="auth-form" on:submit=handle_submit>
            {move || {
                server_error.get().map(|message| view! { <p class="notice-error">{message}</p> })
            }}

            <label class="field-label" for="password">{ "Nueva Contraseña" }</label>
            <input
                id="password"
                type="password"
                placeholder="••••••••"
                prop:value=move || password.get()
                prop:disabled=locked
                on:input=move |e| password.set(event_target_value(&e))
            />

            <label class="field-label" for="confirm-password">{ "Confirmar Contraseña" }</label>
            <input
                id="confirm-password"
                type="password"
                placeholder="••••••••"
                prop:value=move || confirm_password.get()
                prop:disabled=locked
                on:input=move |e| confirm_password.set(event_target_value(&e))
            />

            <button type="submit" class="btn btn-primary" prop:disabled=locked>
                {move || if loading.get() { "Actualizando..." } else { "Establecer Nueva Contraseña" }}
            </button>
        </form>
    }
}
