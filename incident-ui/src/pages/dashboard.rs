use crate::api::ApiClient;
use crate::components::donut::StatusDonut;
use incident_core::stats::DashboardStats;
use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let stats = create_rw_signal(DashboardStats::default());
    let loading = create_rw_signal(true);
    let error = create_rw_signal(None::<String>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match ApiClient::from_session().stats().await {
                Ok(aggregated) => {
                    stats.set(aggregated);
                    error.set(None);
                }
                Err(_) => {
                    error.set(Some("No se pudieron cargar los datos del dashboard.".into()));
                }
            }
            loading.set(false);
        });
    };
    load();

    view! {
      <div class="page">
        <div class="page-head">
          <h1>"Dashboard operativo"</h1>
          <p class="page-subtitle">"Resumen de actividad y métricas de la cuadrilla."</p>
        </div>

        <Show when=move || error.get().is_some() fallback=|| ()>
          <div class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
        </Show>

        <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Cargando..."</p> }>
          <div class="stat-grid">
            <StatCard
              title="Total asignadas"
              value=Signal::derive(move || stats.get().total)
              detail="Incidencias históricas"
            />
            <StatCard
              title="En proceso"
              value=Signal::derive(move || stats.get().in_progress)
              detail="Requieren atención"
            />
            <StatCard
              title="Finalizadas"
              value=Signal::derive(move || stats.get().finalized)
              detail="Trabajos completados"
            />
          </div>

          <div class="dashboard-panels">
            <section class="panel">
              <h2>"Distribución de estado"</h2>
              <StatusDonut stats=stats/>
            </section>

            <section class="panel panel-cta">
              <h2>"Gestión de cuadrillas"</h2>
              <p>
                "Desde aquí puedes monitorear el progreso de las tareas asignadas "
                "y actualizar el estado de las incidencias."
              </p>
              <A href="/incidencias" class="button-primary">"Ver listado de incidencias"</A>
            </section>
          </div>
        </Show>
      </div>
    }
}

#[component]
fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<usize>,
    #[prop(into)] detail: String,
) -> impl IntoView {
    view! {
      <div class="stat-card">
        <p class="stat-title">{title}</p>
        <h3 class="stat-value">{move || value.get()}</h3>
        <p class="stat-detail">{detail}</p>
      </div>
    }
}
