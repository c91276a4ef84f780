use incident_core::incident::{Incident, IncidentStatus, MediaRef};
use incident_core::workflow::{self, IncidentAction};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory incident store for the development stub. The store owns the
/// authoritative state machine: a transition request from a wrong source
/// state is a conflict, a failed precondition is invalid input.
pub struct IncidentStore {
    inner: Mutex<Inner>,
}

struct Inner {
    incidents: BTreeMap<i64, Incident>,
    next_media_id: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
    Conflict(String),
    Invalid(String),
}

impl IncidentStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                incidents: BTreeMap::new(),
                next_media_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("incident store lock")
    }

    pub fn insert(&self, incident: Incident) {
        let mut inner = self.lock();
        for media in &incident.evidence {
            if media.id >= inner.next_media_id {
                inner.next_media_id = media.id + 1;
            }
        }
        inner.incidents.insert(incident.id, incident);
    }

    pub fn list(&self) -> Vec<Incident> {
        self.lock().incidents.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<Incident> {
        self.lock().incidents.get(&id).cloned()
    }

    pub fn start(&self, id: i64) -> Result<Incident, StoreError> {
        let mut inner = self.lock();
        let incident = inner.incidents.get_mut(&id).ok_or(StoreError::NotFound)?;
        if !workflow::allows(incident.status, IncidentAction::Start) {
            return Err(StoreError::Conflict(format!(
                "no se puede iniciar desde '{}'",
                incident.status.label()
            )));
        }
        incident.status = IncidentStatus::InProgress;
        Ok(incident.clone())
    }

    pub fn add_evidence(&self, id: i64, file_names: &[String]) -> Result<Incident, StoreError> {
        workflow::validate_evidence_selection(file_names.len()).map_err(StoreError::Invalid)?;

        let mut inner = self.lock();
        let mut media_id = inner.next_media_id;
        let incident = inner.incidents.get_mut(&id).ok_or(StoreError::NotFound)?;
        if !workflow::allows(incident.status, IncidentAction::UploadEvidence) {
            return Err(StoreError::Conflict(format!(
                "no se pueden subir evidencias en '{}'",
                incident.status.label()
            )));
        }

        for name in file_names {
            incident.evidence.push(MediaRef {
                id: media_id,
                url: format!("/media/{id}/{media_id}-{name}"),
            });
            media_id += 1;
        }
        let updated = incident.clone();
        inner.next_media_id = media_id;
        Ok(updated)
    }

    pub fn finalize(&self, id: i64, comment: &str) -> Result<Incident, StoreError> {
        let mut inner = self.lock();
        let incident = inner.incidents.get_mut(&id).ok_or(StoreError::NotFound)?;
        if !workflow::allows(incident.status, IncidentAction::Finalize) {
            return Err(StoreError::Conflict(format!(
                "no se puede finalizar desde '{}'",
                incident.status.label()
            )));
        }
        workflow::validate_finalize(incident, comment).map_err(StoreError::Invalid)?;
        incident.status = IncidentStatus::Finalized;
        Ok(incident.clone())
    }

    pub fn reject(&self, id: i64, reason: &str) -> Result<Incident, StoreError> {
        workflow::validate_reject(reason).map_err(StoreError::Invalid)?;

        let mut inner = self.lock();
        let incident = inner.incidents.get_mut(&id).ok_or(StoreError::NotFound)?;
        if !workflow::allows(incident.status, IncidentAction::Reject) {
            return Err(StoreError::Conflict(format!(
                "no se puede rechazar desde '{}'",
                incident.status.label()
            )));
        }
        incident.status = IncidentStatus::Rejected;
        incident.rejection_reason = Some(reason.trim().to_string());
        Ok(incident.clone())
    }
}

impl Default for IncidentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(status: IncidentStatus) -> IncidentStore {
        let store = IncidentStore::new();
        store.insert(Incident {
            id: 42,
            title: "Bache en la calzada".into(),
            status,
            ..Incident::default()
        });
        store
    }

    #[test]
    fn start_moves_pending_to_in_progress() {
        let store = store_with(IncidentStatus::Pending);
        let updated = store.start(42).expect("start");
        assert_eq!(updated.status, IncidentStatus::InProgress);
        assert_eq!(store.get(42).expect("get").status, IncidentStatus::InProgress);
    }

    #[test]
    fn start_outside_pending_is_a_conflict() {
        let store = store_with(IncidentStatus::InProgress);
        assert!(matches!(store.start(42), Err(StoreError::Conflict(_))));

        let store = store_with(IncidentStatus::Finalized);
        assert!(matches!(store.start(42), Err(StoreError::Conflict(_))));
    }

    #[test]
    fn missing_incident_is_not_found() {
        let store = IncidentStore::new();
        assert_eq!(store.start(9), Err(StoreError::NotFound));
        assert_eq!(store.finalize(9, "listo"), Err(StoreError::NotFound));
    }

    #[test]
    fn add_evidence_appends_media_with_synthetic_urls() {
        let store = store_with(IncidentStatus::InProgress);
        let updated = store
            .add_evidence(42, &["antes.jpg".into(), "despues.jpg".into()])
            .expect("upload");

        assert_eq!(updated.status, IncidentStatus::InProgress);
        assert_eq!(updated.evidence.len(), 2);
        assert_eq!(updated.evidence[0].url, "/media/42/1-antes.jpg");
        assert_eq!(updated.evidence[1].url, "/media/42/2-despues.jpg");

        let again = store.add_evidence(42, &["extra.jpg".into()]).expect("upload");
        assert_eq!(again.evidence[2].id, 3);
    }

    #[test]
    fn add_evidence_requires_files_and_in_progress() {
        let store = store_with(IncidentStatus::InProgress);
        assert!(matches!(
            store.add_evidence(42, &[]),
            Err(StoreError::Invalid(_))
        ));

        let store = store_with(IncidentStatus::Pending);
        assert!(matches!(
            store.add_evidence(42, &["a.jpg".into()]),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn finalize_requires_evidence_then_lands_terminal() {
        let store = store_with(IncidentStatus::InProgress);
        assert!(matches!(
            store.finalize(42, "Bache reparado"),
            Err(StoreError::Invalid(_))
        ));

        store.add_evidence(42, &["foto.jpg".into()]).expect("upload");
        assert!(matches!(
            store.finalize(42, "   "),
            Err(StoreError::Invalid(_))
        ));

        let updated = store.finalize(42, "Bache reparado").expect("finalize");
        assert_eq!(updated.status, IncidentStatus::Finalized);

        assert!(matches!(
            store.finalize(42, "otra vez"),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn reject_records_the_reason() {
        let store = store_with(IncidentStatus::InProgress);
        assert!(matches!(store.reject(42, " "), Err(StoreError::Invalid(_))));

        let updated = store
            .reject(42, "No es competencia municipal")
            .expect("reject");
        assert_eq!(updated.status, IncidentStatus::Rejected);
        assert_eq!(
            updated.rejection_reason.as_deref(),
            Some("No es competencia municipal")
        );

        assert!(matches!(
            store.reject(42, "de nuevo"),
            Err(StoreError::Conflict(_))
        ));
    }
}
