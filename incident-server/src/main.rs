use incident_core::incident::{Incident, IncidentStatus, MediaRef};
use incident_server::routes::{api_router, ApiContext};
use incident_server::store::IncidentStore;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let store = Arc::new(IncidentStore::new());
    seed_demo_data(&store);

    let token = std::env::var("INCIDENTS_API_TOKEN").unwrap_or_else(|_| "dev-token".into());
    let bind = std::env::var("INCIDENTS_BIND").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let app = api_router(ApiContext { store, token });
    let listener = tokio::net::TcpListener::bind(&bind).await.expect("bind");

    println!("incident-server listening on {bind}");
    axum::serve(listener, app).await.expect("serve");
}

fn seed_demo_data(store: &IncidentStore) {
    store.insert(Incident {
        id: 1,
        title: "Bache en Calle Mayor".into(),
        description: "Bache profundo a la altura del numero 12, junto al paso de peatones.".into(),
        status: IncidentStatus::Pending,
        created_at: "2026-07-28T09:15:00Z".into(),
        location: Some("Calle Mayor 12".into()),
        ..Incident::default()
    });

    store.insert(Incident {
        id: 2,
        title: "Farola apagada en el parque".into(),
        description: "La farola junto a la zona de juegos lleva tres noches sin luz.".into(),
        status: IncidentStatus::InProgress,
        created_at: "2026-07-30T18:40:00Z".into(),
        location: Some("Parque de la Constitucion".into()),
        evidence: vec![MediaRef {
            id: 1,
            url: "/media/2/1-farola.jpg".into(),
        }],
        ..Incident::default()
    });

    store.insert(Incident {
        id: 3,
        title: "Contenedor volcado".into(),
        description: "Contenedor de papel volcado tras el temporal.".into(),
        status: IncidentStatus::Finalized,
        created_at: "2026-07-21T07:05:00Z".into(),
        location: Some("Avenida del Rio 3".into()),
        evidence: vec![MediaRef {
            id: 2,
            url: "/media/3/2-contenedor.jpg".into(),
        }],
        ..Incident::default()
    });

    println!("seeded {} demo incidents", store.list().len());
}
