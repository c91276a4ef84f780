use crate::api::ApiClient;
use crate::session;
use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let loading = create_rw_signal(false);

    let navigate = use_navigate();
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let user = username.get_untracked().trim().to_string();
        let pass = password.get_untracked();
        if user.is_empty() || pass.trim().is_empty() {
            error.set(Some("Usuario y contraseña son obligatorios.".into()));
            return;
        }

        loading.set(true);
        error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match ApiClient::from_session().login(&user, &pass).await {
                Ok(token) => {
                    session::store_token(&token);
                    navigate("/", Default::default());
                }
                Err(_) => {
                    error.set(Some("Credenciales inválidas. Intente nuevamente.".into()));
                }
            }
            loading.set(false);
        });
    };

    view! {
      <div class="login-screen">
        <div class="login-card">
          <h2>"Iniciar sesión"</h2>

          <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="alert alert-error" role="alert">
              {move || error.get().unwrap_or_default()}
            </div>
          </Show>

          <form on:submit=submit>
            <label>
              "Usuario"
              <input
                type="text"
                placeholder="Ingrese su usuario"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
              />
            </label>
            <label>
              "Contraseña"
              <input
                type="password"
                placeholder="Ingrese su contraseña"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
              />
            </label>
            <button type="submit" class="button-primary" disabled=move || loading.get()>
              {move || if loading.get() { "Cargando..." } else { "Ingresar" }}
            </button>
          </form>
        </div>
      </div>
    }
}
