use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

use crate::store::{AuthProvider, Session};
use crate::supabase::Supabase;

fn display_name(session: &Session) -> String {
    if let Some(name) = session.user.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }
    session
        .user
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("Usuario")
        .to_string()
}

/// Top navigation bar. Shows the signed-in user and a sign-out action,
/// or the login/register links when there is no session.
#[component]
pub fn Header() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let session = client.get_value().session_signal();

    let sign_out = move |_| {
        let client = client.get_value();
        spawn_local(async move {
            let _ = client.sign_out().await;
        });
    };

    view! {
        <header class="site-header">
            <A href="/" class="brand">{ "REDIBO" }</A>
            <nav>
                <A href="/">{ "Inicio" }</A>
            </nav>
            <div class="auth-actions">
                {move || match session.get() {
                    Some(session) => view! {
                        <span class="user-name">{ display_name(&session) }</span>
                        <button type="button" class="btn btn-small" on:click=sign_out>
                            { "Cerrar sesión" }
                        </button>
                    }
                    .into_view(),
                    None => view! {
                        <A href="/login" class="btn btn-small">{ "Iniciar Sesión" }</A>
                        <A href="/register" class="btn btn-small btn-primary">{ "Crear Cuenta" }</A>
                    }
                    .into_view(),
                }}
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::display_name;
    use crate::store::{AuthUser, Session};

    fn session(full_name: Option<&str>, email: Option<&str>) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: None,
            user: AuthUser {
                id: "u1".to_string(),
                email: email.map(str::to_string),
                full_name: full_name.map(str::to_string),
            },
        }
    }

    #[test]
    fn prefers_the_profile_name() {
        let s = session(Some("María Quiroga"), Some("maria@ejemplo.com"));
        assert_eq!(display_name(&s), "María Quiroga");
    }

    #[test]
    fn falls_back_to_the_email_local_part() {
        let s = session(None, Some("maria@ejemplo.com"));
        assert_eq!(display_name(&s), "maria");
        let blank = session(Some("   "), Some("maria@ejemplo.com"));
        assert_eq!(display_name(&blank), "maria");
    }

    #[test]
    fn falls_back_to_the_generic_user_label() {
        let s = session(None, None);
        assert_eq!(display_name(&s), "Usuario");
    }
}
