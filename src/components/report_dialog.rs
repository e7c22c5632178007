use leptos::logging::error;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::report_renter;
use crate::error::ApiError;
use crate::models::report::ReportReason;
use crate::supabase::Supabase;

/// "Reportar perfil" button plus the dialog that files the report.
#[component]
pub fn ReportDialog(renter_id: String, renter_name: String) -> impl IntoView {
    let client = store_value(expect_context::<Supabase>());
    let renter_id = store_value(renter_id);

    let open = create_rw_signal(false);
    let selected = create_rw_signal(None::<ReportReason>);
    let additional_info = create_rw_signal(String::new());
    let submitting = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);
    let success = create_rw_signal(false);

    let close = move |_| {
        open.set(false);
        error.set(None);
        success.set(false);
    };

    let submit = move |_| {
        let Some(reason) = selected.get() else {
            error.set(Some("Por favor, seleccione un motivo para el reporte".to_string()));
            return;
        };
        let client = client.get_value();
        let renter_id = renter_id.get_value();
        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            match report_renter(&client, &renter_id, reason, &additional_info.get_untracked()).await
            {
                Ok(_) => {
                    success.set(true);
                    selected.set(None);
                    additional_info.set(String::new());
                }
                Err(err @ (ApiError::Unauthenticated | ApiError::Validation(_))) => {
                    error.set(Some(err.user_message()));
                }
                Err(err) => {
                    error!("[APP] report submit for {renter_id} failed: {err}");
                    error.set(Some("No se pudo enviar el reporte. Intente nuevamente.".to_string()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="report-dialog">
            <button type="button" class="btn btn-danger-outline" on:click=move |_| open.set(true)>
                { "Reportar perfil" }
            </button>
            <Show when=move || open.get()>
                <div class="dialog-backdrop" on:click=close></div>
                <div class="dialog" role="dialog">
                    <h3>{ format!("Reportar perfil de {renter_name}") }</h3>
                    <Show
                        when=move || !success.get()
                        fallback=move || {
                            view! {
                                <div class="dialog-body">
                                    <p class="notice-success">
                                        { "Gracias por ayudarnos a mantener la plataforma segura" }
                                    </p>
                                    <div class="dialog-footer">
                                        <button type="button" class="btn" on:click=close>
                                            { "Cerrar" }
                                        </button>
                                    </div>
                                </div>
                            }
                        }
                    >
                        <div class="dialog-body">
                            <h4>{ "Motivo del reporte" }</h4>
                            <div class="radio-group">
                                {ReportReason::ALL
                                    .iter()
                                    .map(|&reason| {
                                        view! {
                                            <label class="radio-row">
                                                <input
                                                    type="radio"
                                                    name="report-reason"
                                                    value=reason.code()
                                                    prop:checked=move || selected.get() == Some(reason)
                                                    on:change=move |_| selected.set(Some(reason))
                                                />
                                                { reason.label() }
                                            </label>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </div>

                            <label class="field-label" for="additional-info">
                                { "Información adicional (opcional)" }
                            </label>
                            <textarea
                                id="additional-info"
                                rows="4"
                                placeholder="Proporcione detalles adicionales sobre el problema..."
                                prop:value=move || additional_info.get()
                                on:input=move |e| additional_info.set(event_target_value(&e))
                            ></textarea>

                            <p class="dialog-note">
                                { "Su reporte será revisado por nuestro equipo. Todos los reportes \
                                   son confidenciales y ayudan a mantener la plataforma segura para \
                                   todos los usuarios." }
                            </p>

                            {move || {
                                error.get().map(|message| view! { <p class="notice-error">{message}</p> })
                            }}

                            <div class="dialog-footer">
                                <button
                                    type="button"
                                    class="btn"
                                    prop:disabled=move || submitting.get()
                                    on:click=close
                                >
                                    { "Cancelar" }
                                </button>
                                <button
                                    type="button"
                                    class="btn btn-primary"
                                    prop:disabled=move || submitting.get()
                                    on:click=submit
                                >
                                    {move || {
                                        if submitting.get() { "Enviando..." } else { "Enviar reporte" }
                                    }}
                                </button>
                            </div>
                        </div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
