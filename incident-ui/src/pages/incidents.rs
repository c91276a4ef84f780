use crate::api::ApiClient;
use crate::components::status::StatusBadge;
use incident_core::incident::Incident;
use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

/// Text search over the already-fetched set; the list never queries the
/// backend for filtering.
pub fn filter_incidents(incidents: &[Incident], query: &str) -> Vec<Incident> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return incidents.to_vec();
    }
    incidents
        .iter()
        .filter(|incident| {
            incident.title.to_lowercase().contains(&query)
                || incident.description.to_lowercase().contains(&query)
                || incident.id.to_string() == query
        })
        .cloned()
        .collect()
}

#[component]
pub fn IncidentsPage() -> impl IntoView {
    let incidents = create_rw_signal(Vec::<Incident>::new());
    let loading = create_rw_signal(true);
    let error = create_rw_signal(None::<String>);
    let search = create_rw_signal(String::new());

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match ApiClient::from_session().list_incidents().await {
                Ok(list) => {
                    incidents.set(list);
                    error.set(None);
                }
                Err(_) => {
                    error.set(Some("No se pudieron cargar las incidencias.".into()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let filtered = move || filter_incidents(&incidents.get(), &search.get());

    view! {
      <div class="page">
        <div class="page-head">
          <h1>"Incidencias asignadas"</h1>
          <div class="page-tools">
            <input
              type="search"
              placeholder="Buscar por título, descripción o ID"
              prop:value=move || search.get()
              on:input=move |ev| search.set(event_target_value(&ev))
            />
            <button class="button-secondary" on:click=move |_| load()>"Actualizar"</button>
          </div>
        </div>

        <Show when=move || error.get().is_some() fallback=|| ()>
          <div class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
        </Show>

        <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Cargando..."</p> }>
          <div class="table-wrap">
            <table class="incident-table">
              <thead>
                <tr>
                  <th>"ID"</th>
                  <th>"Título"</th>
                  <th>"Estado"</th>
                  <th>"Fecha"</th>
                  <th>"Acciones"</th>
                </tr>
              </thead>
              <tbody>
                <For
                  each=filtered
                  key=|incident| incident.id
                  children=move |incident| {
                    let detail_href = format!("/incidencias/{}", incident.id);
                    let created = incident.created_date().to_string();
                    view! {
                      <tr>
                        <td>{incident.id}</td>
                        <td>{incident.title.clone()}</td>
                        <td><StatusBadge status=incident.status/></td>
                        <td>{created}</td>
                        <td><A href=detail_href>"Ver detalle"</A></td>
                      </tr>
                    }
                  }
                />
              </tbody>
            </table>
            <Show when=move || filtered().is_empty() fallback=|| ()>
              <p class="table-empty">"Sin incidencias que coincidan con la búsqueda."</p>
            </Show>
          </div>
        </Show>
      </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_core::incident::IncidentStatus;

    fn sample() -> Vec<Incident> {
        vec![
            Incident {
                id: 1,
                title: "Bache en Calle Mayor".into(),
                description: "Bache profundo junto al paso de peatones.".into(),
                status: IncidentStatus::Pending,
                ..Incident::default()
            },
            Incident {
                id: 2,
                title: "Farola apagada".into(),
                description: "Sin luz en la zona de juegos.".into(),
                status: IncidentStatus::InProgress,
                ..Incident::default()
            },
        ]
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(filter_incidents(&sample(), "  ").len(), 2);
    }

    #[test]
    fn query_matches_title_and_description_case_insensitively() {
        let found = filter_incidents(&sample(), "FAROLA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        let found = filter_incidents(&sample(), "peatones");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn query_matches_exact_id() {
        let found = filter_incidents(&sample(), "2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        assert!(filter_incidents(&sample(), "99").is_empty());
    }
}
