use leptos::logging::error;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{fetch_renter_details, get_first_renter_id};
use crate::components::add_renter_form::AddRenterForm;
use crate::components::auth_guard::RequireAuth;
use crate::components::forgot_password_form::ForgotPasswordForm;
use crate::components::header::Header;
use crate::components::login_form::LoginForm;
use crate::components::register_form::RegisterForm;
use crate::components::renter_details::RenterProfile;
use crate::components::reset_password_form::ResetPasswordForm;
use crate::config::SupabaseConfig;
use crate::models::renter::RenterDetails;
use crate::models::review::ReviewView;
use crate::supabase::Supabase;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let client = Supabase::new(SupabaseConfig::from_env());
    provide_context(client.clone());

    // Pick the persisted session back up after a reload. Effects only run
    // on the client, so this never touches storage during SSR.
    create_effect(move |_| {
        client.restore_session();
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/rentscore.css"/>
        <Title text="Redibo"/>
        <Router>
            <Header/>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/renters/:id" view=RenterPage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/forgot-password" view=ForgotPasswordPage/>
                    <Route path="/reset-password" view=ResetPasswordPage/>
                    <Route path="/add-renter" view=AddRenterPage/>
                    <Route path="/*any" view=NotFound/>
                </Routes>
            </main>
        </Router>
    }
}

/// Landing page: sends the visitor to the first renter on record, or
/// explains that the database is still empty.
#[component]
fn HomePage() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let navigate = use_navigate();
    let empty = create_rw_signal(false);

    create_effect(move |_| {
        let client = client.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            match get_first_renter_id(&client).await {
                Some(id) => {
                    navigate(
                        &format!("/renters/{id}"),
                        NavigateOptions { replace: true, ..Default::default() },
                    );
                }
                None => empty.set(true),
            }
        });
    });

    view! {
        <Show
            when=move || empty.get()
            fallback=|| view! { <div class="spinner" aria-label="Cargando"></div> }
        >
            <div class="empty-state">
                <h2>{ "No se encontraron arrendatarios en la base de datos." }</h2>
                <p class="muted">
                    { "Necesita agregar arrendatarios a la base de datos para ver sus detalles." }
                </p>
                <A href="/add-renter" class="btn">{ "Agregar Arrendatario" }</A>
            </div>
        </Show>
    }
}

/// Profile page for one renter. Data loads on the client; a review added
/// through the form is prepended locally instead of refetching.
#[component]
fn RenterPage() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let params = use_params_map();
    let details = create_rw_signal(None::<Result<RenterDetails, String>>);

    create_effect(move |_| {
        let renter_id = params.with(|p| p.get("id").cloned().unwrap_or_default());
        let client = client.get_value();
        details.set(None);
        spawn_local(async move {
            match fetch_renter_details(&client, &renter_id).await {
                Ok(data) => details.set(Some(Ok(data))),
                Err(err) => {
                    error!("[APP] loading renter {renter_id} failed: {err}");
                    details.set(Some(Err(err.user_message())));
                }
            }
        });
    });

    let on_review_added = Callback::new(move |review: ReviewView| {
        details.update(|state| {
            if let Some(Ok(data)) = state {
                data.reviews.insert(0, review);
                data.review_count = data.reviews.len();
            }
        });
    });

    view! {
        {move || match details.get() {
            None => view! { <div class="spinner" aria-label="Cargando"></div> }.into_view(),
            Some(Err(message)) => view! {
                <div class="empty-state">
                    <h2>{message}</h2>
                    <p class="muted">{ "Por favor, intente nuevamente más tarde." }</p>
                </div>
            }
            .into_view(),
            Some(Ok(data)) => view! {
                <RenterProfile details=data on_review_added=on_review_added/>
            }
            .into_view(),
        }}
    }
}

#[component]
fn LoginPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h2>{ "Iniciar Sesión" }</h2>
                <p class="muted">{ "Ingrese sus credenciales para acceder a su cuenta" }</p>
                <LoginForm/>
                <p class="auth-footer">
                    { "¿No tiene una cuenta? " }
                    <A href="/register">{ "Regístrese aquí" }</A>
                </p>
            </div>
        </div>
    }
}

#[component]
fn RegisterPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h2>{ "Crear Cuenta" }</h2>
                <p class="muted">{ "Ingrese sus datos para registrarse en la plataforma" }</p>
                <RegisterForm/>
                <p class="auth-footer">
                    { "¿Ya tiene una cuenta? " }
                    <A href="/login">{ "Inicie sesión aquí" }</A>
                </p>
            </div>
        </div>
    }
}

#[component]
fn ForgotPasswordPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h2>{ "Recuperar Contraseña" }</h2>
                <p class="muted">
                    { "Ingrese su correo electrónico para recibir un enlace de recuperación" }
                </p>
                <ForgotPasswordForm/>
                <p class="auth-footer">
                    <A href="/login">{ "Volver al inicio de sesión" }</A>
                </p>
            </div>
        </div>
    }
}

#[component]
fn ResetPasswordPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <h2>{ "Establecer Nueva Contraseña" }</h2>
                <p class="muted">{ "Cree una nueva contraseña para su cuenta" }</p>
                <ResetPasswordForm/>
            </div>
        </div>
    }
}

#[component]
fn AddRenterPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AddRenterForm/>
        </RequireAuth>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>{ "Página no encontrada" }</h2>
            <A href="/" class="btn">{ "Volver al inicio" }</A>
        </div>
    }
}
