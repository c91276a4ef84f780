use crate::session;
use leptos::*;
use leptos_router::{use_navigate, Outlet, A};

/// Shell around every authenticated page: sidebar navigation, top bar with
/// logout, routed content below. Entering without a stored credential
/// redirects to the login view.
#[component]
pub fn MainLayout() -> impl IntoView {
    let navigate = use_navigate();
    create_effect(move |_| {
        if session::token().is_none() {
            navigate("/login", Default::default());
        }
    });

    view! {
      <div class="layout-shell">
        <Sidebar/>
        <div class="layout-main">
          <Header/>
          <main class="layout-content">
            <Outlet/>
          </main>
        </div>
      </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let navigate = use_navigate();
    let logout = move |_| {
        session::clear_token();
        navigate("/login", Default::default());
    };

    view! {
      <header class="topbar">
        <span class="topbar-user">"Cuadrilla"</span>
        <button class="topbar-logout" on:click=logout>"Cerrar sesión"</button>
      </header>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
      <aside class="sidebar">
        <div class="sidebar-brand">
          <h1>"MuniGestión"</h1>
        </div>
        <nav class="sidebar-nav">
          <A href="/" exact=true>"Dashboard"</A>
          <A href="/incidencias">"Incidencias"</A>
        </nav>
      </aside>
    }
}
