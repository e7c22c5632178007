use leptos::ev::SubmitEvent;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::looks_like_email;
use crate::store::AuthProvider;
use crate::supabase::Supabase;

/// Requests a password-recovery email. The recovery link points back at
/// this site's /reset-password page.
#[component]
pub fn ForgotPasswordForm() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());

    let email = create_rw_signal(String::new());
    let loading = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);
    let sent = create_rw_signal(false);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get_untracked();
        if !looks_like_email(&email_value) {
            error.set(Some("Ingrese un correo electrónico válido".to_string()));
            return;
        }

        let client = client.get_value();
        let origin = gloo_utils::window().location().origin().unwrap_or_default();
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let redirect_to = format!("{origin}/reset-password");
            match client
                .request_password_reset(email_value.trim(), &redirect_to)
                .await
            {
                Ok(()) => sent.set(true),
                Err(err) => error.set(Some(err.user_message())),
            }
            loading.set(false);
        });
    };

    view! {
        <Show
            when=move || !sent.get()
            fallback=|| {
                view! {
                    <div class="auth-form-success">
                        <span class="check">{ "✓" }</span>
                        <h3>{ "Correo enviado" }</h3>
                        <p class="muted">
                            { "Hemos enviado un correo con instrucciones para recuperar su \
                               contraseña. Por favor, revise su bandeja de entrada." }
                        </p>
                    </div>
                }
            }
        >
            <form class="auth-form" on:submit=handle_submit>
                {move || error.get().map(|message| view! { <p class="notice-error">{message}</p> })}

                <label class="field-label" for="email">{ "Correo Electrónico" }</label>
                <input
                    id="email"
                    type="email"
                    placeholder="correo@ejemplo.com"
                    prop:value=move || email.get()
                    prop:disabled=move || loading.get()
                    on:input=move |e| email.set(event_target_value(&e))
                />

                <button type="submit" class="btn btn-primary" prop:disabled=move || loading.get()>
                    {move || {
                        if loading.get() { "Enviando..." } else { "Enviar correo de recuperación" }
                    }}
                </button>
            </form>
        </Show>
    }
}
