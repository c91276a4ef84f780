use crate::components::layout::MainLayout;
use crate::pages::dashboard::DashboardPage;
use crate::pages::incident_detail::IncidentDetailPage;
use crate::pages::incidents::IncidentsPage;
use crate::pages::login::LoginPage;
use leptos::*;
use leptos_router::{Route, Router, Routes};

#[component]
pub fn App() -> impl IntoView {
    view! {
      <Router>
        <Routes>
          <Route path="/login" view=LoginPage/>
          <Route path="/" view=MainLayout>
            <Route path="" view=DashboardPage/>
            <Route path="incidencias" view=IncidentsPage/>
            <Route path="incidencias/:id" view=IncidentDetailPage/>
          </Route>
        </Routes>
      </Router>
    }
}
