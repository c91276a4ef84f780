use crate::api::{ApiClient, EvidenceUpload};
use crate::components::modal::{ConfirmDialog, Modal, Notice, NoticeKind, NoticeModal};
use crate::components::status::StatusBadge;
use incident_core::incident::Incident;
use incident_core::workflow::{self, IncidentAction};
use leptos::*;
use leptos_router::{use_params_map, A};
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn IncidentDetailPage() -> impl IntoView {
    let params = use_params_map();
    let incident_id = move || {
        params.with(|p| {
            p.get("id")
                .and_then(|raw| raw.parse::<i64>().ok())
                .unwrap_or_default()
        })
    };

    let incident = create_rw_signal(None::<Incident>);
    let loading = create_rw_signal(true);
    let error = create_rw_signal(None::<String>);
    let processing = create_rw_signal(false);

    let show_confirm_start = create_rw_signal(false);
    let show_upload = create_rw_signal(false);
    let show_finalize = create_rw_signal(false);
    let show_reject = create_rw_signal(false);

    let closing_comment = create_rw_signal(String::new());
    let reject_reason = create_rw_signal(String::new());
    let staged_files = create_rw_signal(Vec::<web_sys::File>::new());

    let notice = create_rw_signal(None::<Notice>);
    let notify = move |kind: NoticeKind, title: &str, message: &str| {
        notice.set(Some(Notice {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        }));
    };

    let load = move || {
        let id = incident_id();
        loading.set(true);
        spawn_local(async move {
            match ApiClient::from_session().get_incident(id).await {
                Ok(Some(found)) => {
                    incident.set(Some(found));
                    error.set(None);
                }
                Ok(None) | Err(_) => {
                    error.set(Some("No se pudo cargar la incidencia.".into()));
                }
            }
            loading.set(false);
        });
    };
    load();

    // Each transition: client-checked preconditions, one request, full
    // re-fetch on success, generic alert on failure.
    let start_work = move || {
        let id = incident_id();
        show_confirm_start.set(false);
        processing.set(true);
        spawn_local(async move {
            match ApiClient::from_session().start(id).await {
                Ok(()) => {
                    load();
                    notify(
                        NoticeKind::Success,
                        "Trabajo iniciado",
                        "La incidencia ahora está en proceso.",
                    );
                }
                Err(_) => notify(NoticeKind::Error, "Error", "No se pudo iniciar la incidencia."),
            }
            processing.set(false);
        });
    };

    let upload_evidence = move || {
        let files = staged_files.get_untracked();
        if let Err(message) = workflow::validate_evidence_selection(files.len()) {
            notify(NoticeKind::Error, "Sin archivos", &message);
            return;
        }

        let id = incident_id();
        processing.set(true);
        spawn_local(async move {
            let uploads = match read_staged_files(files).await {
                Ok(uploads) => uploads,
                Err(_) => {
                    notify(NoticeKind::Error, "Error", "Falló la subida de archivos.");
                    processing.set(false);
                    return;
                }
            };
            match ApiClient::from_session().upload_evidence(id, uploads).await {
                Ok(()) => {
                    show_upload.set(false);
                    staged_files.set(Vec::new());
                    load();
                    notify(
                        NoticeKind::Success,
                        "Evidencia subida",
                        "Las fotos se han guardado correctamente.",
                    );
                }
                Err(_) => notify(NoticeKind::Error, "Error", "Falló la subida de archivos."),
            }
            processing.set(false);
        });
    };

    let finalize_work = move || {
        let Some(current) = incident.get_untracked() else {
            return;
        };
        let comment = closing_comment.get_untracked();
        if let Err(message) = workflow::validate_finalize(&current, &comment) {
            notify(NoticeKind::Error, "Campo requerido", &message);
            return;
        }

        let id = incident_id();
        processing.set(true);
        spawn_local(async move {
            match ApiClient::from_session().finalize(id, comment.trim()).await {
                Ok(()) => {
                    show_finalize.set(false);
                    closing_comment.set(String::new());
                    load();
                    notify(
                        NoticeKind::Success,
                        "Tarea completada",
                        "La incidencia ha sido finalizada exitosamente.",
                    );
                }
                Err(_) => notify(NoticeKind::Error, "Error", "No se pudo finalizar la incidencia."),
            }
            processing.set(false);
        });
    };

    let reject_work = move || {
        let reason = reject_reason.get_untracked();
        if let Err(message) = workflow::validate_reject(&reason) {
            notify(NoticeKind::Error, "Campo requerido", &message);
            return;
        }

        let id = incident_id();
        processing.set(true);
        spawn_local(async move {
            match ApiClient::from_session().reject(id, reason.trim()).await {
                Ok(()) => {
                    show_reject.set(false);
                    reject_reason.set(String::new());
                    load();
                    notify(
                        NoticeKind::Success,
                        "Incidencia rechazada",
                        "El estado ha sido actualizado.",
                    );
                }
                Err(_) => notify(NoticeKind::Error, "Error", "No se pudo rechazar."),
            }
            processing.set(false);
        });
    };

    let on_files_selected = move |ev: ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            let mut staged = staged_files.get_untracked();
            for index in 0..list.length() {
                if let Some(file) = list.get(index) {
                    staged.push(file);
                }
            }
            staged_files.set(staged);
        }
    };

    let remove_staged = move |index: usize| {
        let mut staged = staged_files.get_untracked();
        if index < staged.len() {
            staged.remove(index);
        }
        staged_files.set(staged);
    };

    view! {
      <div class="page">
        <A href="/incidencias" class="back-link">"← Volver al listado"</A>

        <Show when=move || loading.get() fallback=|| ()>
          <p class="loading">"Cargando..."</p>
        </Show>

        <Show when=move || !loading.get() && incident.get().is_none() fallback=|| ()>
          <div class="alert alert-error">
            {move || error.get().unwrap_or_else(|| "No se pudo cargar la incidencia.".into())}
          </div>
        </Show>

        {move || incident.get().map(|current| {
            let actions = workflow::available_actions(current.status);
            let offers = |action: IncidentAction| actions.contains(&action);
            let created = current.created_date().to_string();
            let location = current.display_location().to_string();

            view! {
              <div class="detail">
                <div class="detail-head">
                  <div>
                    <div class="detail-title">
                      <h1>{format!("Incidencia #{}", current.id)}</h1>
                      <StatusBadge status=current.status/>
                    </div>
                    <p class="detail-created">{format!("Creada el {created}")}</p>
                  </div>

                  <div class="detail-actions">
                    {offers(IncidentAction::Start).then(|| view! {
                      <button
                        class="button-primary"
                        disabled=move || processing.get()
                        on:click=move |_| show_confirm_start.set(true)
                      >
                        {move || if processing.get() { "Procesando..." } else { "Iniciar trabajo" }}
                      </button>
                    })}
                    {offers(IncidentAction::Reject).then(|| view! {
                      <button class="button-danger" on:click=move |_| show_reject.set(true)>
                        "Rechazar"
                      </button>
                    })}
                    {offers(IncidentAction::UploadEvidence).then(|| view! {
                      <button class="button-secondary" on:click=move |_| show_upload.set(true)>
                        "Subir fotos"
                      </button>
                    })}
                    {offers(IncidentAction::Finalize).then(|| view! {
                      <button class="button-success" on:click=move |_| show_finalize.set(true)>
                        "Finalizar tarea"
                      </button>
                    })}
                  </div>
                </div>

                <div class="detail-grid">
                  <section class="panel detail-info">
                    <h2>"Detalles de la incidencia"</h2>
                    <label>"Título"</label>
                    <p class="detail-field">{current.title.clone()}</p>
                    <label>"Descripción"</label>
                    <p class="detail-field">{current.description.clone()}</p>
                    <label>"Ubicación"</label>
                    <p class="detail-field">{location}</p>

                    {current.rejection_reason.clone().map(|reason| view! {
                      <div class="rejection-note">
                        <h3>"Nota de resolución / rechazo"</h3>
                        <p>{reason}</p>
                      </div>
                    })}
                  </section>

                  <section class="panel detail-evidence">
                    <h2>"Galería de evidencias"</h2>
                    {if current.evidence.is_empty() {
                        view! {
                          <div class="evidence-empty">
                            <p>"Sin evidencias aún."</p>
                            <p class="hint">"Usa \"Subir fotos\" para agregar pruebas del trabajo."</p>
                          </div>
                        }.into_view()
                    } else {
                        current.evidence.iter().map(|media| view! {
                          <a class="evidence-item" href=media.url.clone() target="_blank" rel="noreferrer">
                            <img src=media.url.clone() alt="evidencia"/>
                          </a>
                        }).collect_view()
                    }}
                  </section>
                </div>
              </div>
            }
        })}

        <Show when=move || show_confirm_start.get() fallback=|| ()>
          <ConfirmDialog
            title="¿Iniciar trabajo?"
            message="El estado cambiará a \"En proceso\" y se notificará el inicio de labores."
            on_confirm=move |_| start_work()
            on_cancel=move |_| show_confirm_start.set(false)
          />
        </Show>

        <Show when=move || show_upload.get() fallback=|| ()>
          <Modal
            title="Subir evidencias"
            on_close=move |_| {
                show_upload.set(false);
                staged_files.set(Vec::new());
            }
          >
            <label class="file-picker">
              "Haz clic para seleccionar fotos (JPG, PNG)"
              <input type="file" multiple accept="image/*" on:change=on_files_selected/>
            </label>

            <ul class="staged-files">
              <For
                each={move || staged_files.get().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(index, file)| format!("{index}-{}", file.name())
                children=move |(index, file)| view! {
                  <li>
                    <span>{file.name()}</span>
                    <button class="chip-remove" on:click=move |_| remove_staged(index)>"×"</button>
                  </li>
                }
              />
            </ul>

            <button
              class="button-primary"
              disabled=move || processing.get() || staged_files.get().is_empty()
              on:click=move |_| upload_evidence()
            >
              {move || {
                  if processing.get() {
                      "Subiendo...".to_string()
                  } else {
                      format!("Subir {} foto(s)", staged_files.get().len())
                  }
              }}
            </button>
          </Modal>
        </Show>

        <Show when=move || show_finalize.get() fallback=|| ()>
          <Modal title="Finalizar incidencia" on_close=move |_| show_finalize.set(false)>
            <p class="hint">
              "Asegúrate de haber subido todas las fotos necesarias antes de finalizar."
            </p>
            <label>"Comentario de cierre *"</label>
            <textarea
              rows="4"
              placeholder="Describe brevemente la solución aplicada..."
              prop:value=move || closing_comment.get()
              on:input=move |ev| closing_comment.set(event_target_value(&ev))
            ></textarea>
            <button
              class="button-success"
              disabled=move || processing.get()
              on:click=move |_| finalize_work()
            >
              {move || if processing.get() { "Finalizando..." } else { "Confirmar finalización" }}
            </button>
          </Modal>
        </Show>

        <Show when=move || show_reject.get() fallback=|| ()>
          <Modal title="Rechazar incidencia" on_close=move |_| show_reject.set(false)>
            <p class="hint">
              "La incidencia pasará a estado \"Rechazada\" y se notificará al administrador."
            </p>
            <label>"Motivo del rechazo *"</label>
            <textarea
              rows="3"
              placeholder="Explica por qué no se puede realizar el trabajo..."
              prop:value=move || reject_reason.get()
              on:input=move |ev| reject_reason.set(event_target_value(&ev))
            ></textarea>
            <button
              class="button-danger"
              disabled=move || processing.get()
              on:click=move |_| reject_work()
            >
              {move || if processing.get() { "Procesando..." } else { "Confirmar rechazo" }}
            </button>
          </Modal>
        </Show>

        {move || notice.get().map(|current| view! {
          <NoticeModal notice=current on_close=move |_| notice.set(None)/>
        })}
      </div>
    }
}

/// Read the browser `File`s staged in the upload modal into memory so the
/// service module can send them as multipart parts.
async fn read_staged_files(files: Vec<web_sys::File>) -> Result<Vec<EvidenceUpload>, String> {
    let mut uploads = Vec::new();
    for file in files {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|_| format!("no se pudo leer {}", file.name()))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        let mime_type = {
            let declared = file.type_();
            if declared.is_empty() {
                "application/octet-stream".to_string()
            } else {
                declared
            }
        };
        uploads.push(EvidenceUpload {
            file_name: file.name(),
            mime_type,
            bytes,
        });
    }
    Ok(uploads)
}
