use leptos::*;
use leptos_router::A;

use crate::supabase::Supabase;

/// Renders its children only for signed-in users; everyone else gets the
/// restricted-access card with links to log in or register.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let client = expect_context::<Supabase>();
    let session = client.session_signal();

    view! {
        <Show
            when=move || session.get().is_some()
            fallback=|| {
                view! {
                    <div class="auth-check">
                        <div class="card auth-check-card">
                            <div class="lock-icon">{ "🔒" }</div>
                            <h2>{ "Acceso Restringido" }</h2>
                            <p class="muted">
                                { "Necesita iniciar sesión para acceder a esta página" }
                            </p>
                            <p class="muted">
                                { "Esta sección está disponible solo para usuarios registrados. \
                                   Por favor inicie sesión o cree una cuenta para continuar." }
                            </p>
                            <A href="/login" class="btn btn-primary">{ "Iniciar Sesión" }</A>
                            <A href="/register" class="btn">{ "Crear Cuenta" }</A>
                        </div>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
