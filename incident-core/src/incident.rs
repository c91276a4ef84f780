use serde::{Deserialize, Serialize};

/// Wire model of a reported incident as the municipal backend serializes it.
/// Field names on the wire are the backend's (Spanish); a missing `estado`
/// means the incident has not been picked up yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "estado", default)]
    pub status: IncidentStatus,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: String,
    #[serde(rename = "ubicacion", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressRef>,
    #[serde(rename = "motivo_rechazo", default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(rename = "multimedias", default)]
    pub evidence: Vec<MediaRef>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en_proceso")]
    InProgress,
    #[serde(rename = "finalizada")]
    Finalized,
    #[serde(rename = "rechazada")]
    Rejected,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressRef {
    #[serde(rename = "nombre_direccion")]
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: i64,
    pub url: String,
}

impl IncidentStatus {
    /// The backend's name for this status, as used in query parameters.
    pub fn as_wire(self) -> &'static str {
        match self {
            IncidentStatus::Pending => "pendiente",
            IncidentStatus::InProgress => "en_proceso",
            IncidentStatus::Finalized => "finalizada",
            IncidentStatus::Rejected => "rechazada",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IncidentStatus::Pending => "Pendiente",
            IncidentStatus::InProgress => "En proceso",
            IncidentStatus::Finalized => "Finalizada",
            IncidentStatus::Rejected => "Rechazada",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, IncidentStatus::Finalized | IncidentStatus::Rejected)
    }
}

impl Incident {
    /// Free-text location, falling back to the structured address reference.
    pub fn display_location(&self) -> &str {
        if let Some(location) = self.location.as_deref() {
            if !location.trim().is_empty() {
                return location;
            }
        }
        if let Some(address) = &self.address {
            if !address.name.trim().is_empty() {
                return &address.name;
            }
        }
        "Ubicación no especificada"
    }

    /// Date portion of the creation timestamp.
    pub fn created_date(&self) -> &str {
        self.created_at.split('T').next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_deserializes_as_pending() {
        let incident: Incident = serde_json::from_value(serde_json::json!({
            "id": 7,
            "titulo": "Farola apagada"
        }))
        .expect("incident json");

        assert_eq!(incident.status, IncidentStatus::Pending);
        assert!(incident.evidence.is_empty());
        assert!(incident.rejection_reason.is_none());
    }

    #[test]
    fn status_uses_backend_wire_names() {
        let incident: Incident = serde_json::from_value(serde_json::json!({
            "id": 1,
            "titulo": "Bache",
            "estado": "en_proceso",
            "multimedias": [{"id": 3, "url": "/media/1/3.jpg"}]
        }))
        .expect("incident json");

        assert_eq!(incident.status, IncidentStatus::InProgress);
        assert_eq!(incident.evidence[0].url, "/media/1/3.jpg");

        let back = serde_json::to_value(&incident).expect("to json");
        assert_eq!(back["estado"], "en_proceso");
        assert_eq!(back["titulo"], "Bache");
    }

    #[test]
    fn wire_names_match_the_serde_encoding() {
        for status in [
            IncidentStatus::Pending,
            IncidentStatus::InProgress,
            IncidentStatus::Finalized,
            IncidentStatus::Rejected,
        ] {
            let encoded = serde_json::to_value(status).expect("status json");
            assert_eq!(encoded, status.as_wire());
        }
    }

    #[test]
    fn display_location_prefers_free_text_then_address() {
        let mut incident = Incident {
            location: Some("Calle Mayor 12".into()),
            address: Some(AddressRef {
                name: "Plaza Vieja".into(),
            }),
            ..Incident::default()
        };
        assert_eq!(incident.display_location(), "Calle Mayor 12");

        incident.location = Some("   ".into());
        assert_eq!(incident.display_location(), "Plaza Vieja");

        incident.address = None;
        assert_eq!(incident.display_location(), "Ubicación no especificada");
    }

    #[test]
    fn created_date_drops_time_component() {
        let incident = Incident {
            created_at: "2026-03-14T09:30:00Z".into(),
            ..Incident::default()
        };
        assert_eq!(incident.created_date(), "2026-03-14");
    }
}
