use chrono::{SecondsFormat, Utc};
use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::components::looks_like_email;
use crate::models::profile::ProfileUpsert;
use crate::store::{AuthProvider, DataStore, SignUpOutcome};
use crate::supabase::Supabase;

fn validate(full_name: &str, email: &str, password: &str, confirm: &str) -> Result<(), String> {
    if full_name.trim().chars().count() < 2 {
        return Err("El nombre debe tener al menos 2 caracteres".to_string());
    }
    if !looks_like_email(email) {
        return Err("Ingrese un correo electrónico válido".to_string());
    }
    if password.chars().count() < 6 {
        return Err("La contraseña debe tener al menos 6 caracteres".to_string());
    }
    if password != confirm {
        return Err("Las contraseñas no coinciden".to_string());
    }
    Ok(())
}

/// Account creation form. After signup the display name is mirrored into
/// the profiles table so reviews can show it; a failure there is logged
/// and ignored, the account itself is already created.
#[component]
pub fn RegisterForm() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let navigate = use_navigate();

    let full_name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let loading = create_rw_signal(false);
    let server_error = create_rw_signal(None::<String>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let name_value = full_name.get_untracked();
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(message) = validate(
            &name_value,
            &email_value,
            &password_value,
            &confirm_password.get_untracked(),
        ) {
            server_error.set(Some(message));
            return;
        }

        let client = client.get_value();
        let navigate = navigate.clone();
        loading.set(true);
        server_error.set(None);
        spawn_local(async move {
            match client
                .sign_up(email_value.trim(), &password_value, name_value.trim())
                .await
            {
                Ok(SignUpOutcome { user_id, .. }) => {
                    if let Some(user_id) = user_id {
                        let profile = ProfileUpsert {
                            id: user_id,
                            full_name: name_value.trim().to_string(),
                            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                        };
                        if let Err(err) = client.upsert_profile(&profile).await {
                            warn!("[AUTH] profile upsert after signup failed: {err}");
                        }
                    }
                    navigate("/login", Default::default());
                }
                Err(err) => {
                    server_error.set(Some(err.user_message()));
                    loading.set(false);
                }
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=handle_submit>
            {move || {
                server_error.get().map(|message| view! { <p class="notice-error">{message}</p> })
            }}

            <label class="field-label" for="full-name">{ "Nombre Completo" }</label>
            <input
                id="full-name"
                type="text"
                placeholder="Juan Pérez"
                prop:value=move || full_name.get()
                prop:disabled=move || loading.get()
                on:input=move |e| full_name.set(event_target_value(&e))
            />

            <label class="field-label" for="email">{ "Correo Electrónico" }</label>
            <input
                id="email"
                type="email"
                placeholder="correo@ejemplo.com"
                prop:value=move || email.get()
                prop:disabled=move || loading.get()
                on:input=move |e| email.set(event_target_value(&e))
            />

            <label class="field-label" for="password">{ "Contraseña" }</label>
            <input
                id="password"
                type="password"
                placeholder="••••••••"
                prop:value=move || password.get()
                prop:disabled=move || loading.get()
                on:input=move |e| password.set(event_target_value(&e))
            />

            <label class="field-label" for="confirm-password">{ "Confirmar Contraseña" }</label>
            <input
                id="confirm-password"
                type="password"
                placeholder="••••••••"
                prop:value=move || confirm_password.get()
                prop:disabled=move || loading.get()
                on:input=move |e| confirm_password.set(event_target_value(&e))
            />

            <button type="submit" class="btn btn-primary" prop:disabled=move || loading.get()>
                {move || if loading.get() { "Registrando..." } else { "Crear Cuenta" }}
            </button>
        </form>
    }
}
