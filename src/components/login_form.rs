use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::{use_navigate, A};
use wasm_bindgen_futures::spawn_local;

use crate::components::looks_like_email;
use crate::store::AuthProvider;
use crate::supabase::Supabase;

/// Email/password sign-in form.
#[component]
pub fn LoginForm() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let loading = create_rw_signal(false);
    let server_error = create_rw_signal(None::<String>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if !looks_like_email(&email_value) {
            server_error.set(Some("Ingrese un correo electrónico válido".to_string()));
            return;
        }
        if password_value.is_empty() {
            server_error.set(Some("La contraseña es requerida".to_string()));
            return;
        }

        let client = client.get_value();
        let navigate = navigate.clone();
        loading.set(true);
        server_error.set(None);
        spawn_local(async move {
            match client.sign_in(email_value.trim(), &password_value).await {
                Ok(_) => {
                    navigate("/", Default::default());
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
            <A href="/forgot-password" class="form-link">{ "¿Olvidó su contraseña?" }</A>

            <button type="submit" class="btn btn-primary" prop:disabled=move || loading.get()>
                {move || if loading.get() { "Iniciando sesión..." } else { "Iniciar Sesión" }}
            </button>
        </form>
    }
}
