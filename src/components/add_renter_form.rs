use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::{use_navigate, A};
use wasm_bindgen_futures::spawn_local;

use crate::api::{create_renter, NewRenterInput};
use crate::error::ApiError;
use crate::supabase::Supabase;

/// Form for registering a new renter profile.
#[component]
pub fn AddRenterForm() -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let navigate = use_navigate();

    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let age = create_rw_signal(String::new());
    let occupation = create_rw_signal(String::new());
    let address = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let input = NewRenterInput {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            age: age.get_untracked().trim().parse().ok(),
            occupation: occupation.get_untracked(),
            address: address.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
        };

        let client = client.get_value();
        let navigate = navigate.clone();
        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            match create_renter(&client, input).await {
                Ok(_) => {
                    navigate("/", Default::default());
                }
                Err(ApiError::Validation(message)) => {
                    error.set(Some(message));
                    submitting.set(false);
                }
                Err(_) => {
                    error.set(Some("No se pudo agregar el arrendatario".to_string()));
                    submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="add-renter">
            <A href="/" class="form-link">{ "Volver a la página principal" }</A>

            <div class="card">
                <h2>{ "Agregar Nuevo Arrendatario" }</h2>
                <p class="muted">{ "Ingrese los datos del nuevo arrendatario" }</p>

                <form on:submit=handle_submit>
                    {move || error.get().map(|message| view! { <p class="notice-error">{message}</p> })}

                    <div class="form-grid">
                        <div>
                            <label class="field-label" for="first_name">{ "Nombre *" }</label>
                            <input
                                id="first_name"
                                type="text"
                                prop:value=move || first_name.get()
                                on:input=move |e| first_name.set(event_target_value(&e))
                            />
                        </div>
                        <div>
                            <label class="field-label" for="last_name">{ "Apellido *" }</label>
                            <input
                                id="last_name"
                                type="text"
                                prop:value=move || last_name.get()
                                on:input=move |e| last_name.set(event_target_value(&e))
                            />
                        </div>
                    </div>

                    <div class="form-grid">
                        <div>
                            <label class="field-label" for="age">{ "Edad" }</label>
                            <input
                                id="age"
                                type="number"
                                min="18"
                                max="100"
                                prop:value=move || age.get()
                                on:input=move |e| age.set(event_target_value(&e))
                            />
                        </div>
                        <div>
                            <label class="field-label" for="occupation">{ "Ocupación" }</label>
                            <input
                                id="occupation"
                                type="text"
                                prop:value=move || occupation.get()
                                on:input=move |e| occupation.set(event_target_value(&e))
                            />
                        </div>
                    </div>

                    <label class="field-label" for="address">{ "Dirección" }</label>
                    <input
                        id="address"
                        type="text"
                        prop:value=move || address.get()
                        on:input=move |e| address.set(event_target_value(&e))
                    />

                    <label class="field-label" for="email">{ "Correo Electrónico *" }</label>
                    <input
                        id="email"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |e| email.set(event_target_value(&e))
                    />

                    <label class="field-label" for="phone">{ "Teléfono" }</label>
                    <input
                        id="phone"
                        type="text"
                        prop:value=move || phone.get()
                        on:input=move |e| phone.set(event_target_value(&e))
                    />

                    <button type="submit" class="btn btn-primary" prop:disabled=move || submitting.get()>
                        {move || if submitting.get() { "Guardando..." } else { "Guardar Arrendatario" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
