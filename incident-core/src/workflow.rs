use crate::incident::{Incident, IncidentStatus};

/// The four client-initiated requests of the incident lifecycle. Which ones a
/// view offers depends only on the current status; the backend remains the
/// authority on the resulting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IncidentAction {
    Start,
    UploadEvidence,
    Finalize,
    Reject,
}

pub fn available_actions(status: IncidentStatus) -> &'static [IncidentAction] {
    match status {
        IncidentStatus::Pending => &[IncidentAction::Start],
        IncidentStatus::InProgress => &[
            IncidentAction::UploadEvidence,
            IncidentAction::Finalize,
            IncidentAction::Reject,
        ],
        IncidentStatus::Finalized | IncidentStatus::Rejected => &[],
    }
}

pub fn allows(status: IncidentStatus, action: IncidentAction) -> bool {
    available_actions(status).contains(&action)
}

/// Upload requires at least one selected file.
pub fn validate_evidence_selection(selected: usize) -> Result<(), String> {
    if selected == 0 {
        return Err("Selecciona al menos una foto.".into());
    }
    Ok(())
}

/// Finalization requires a non-empty closing comment and previously attached
/// evidence; both are checked before any request is sent.
pub fn validate_finalize(incident: &Incident, comment: &str) -> Result<(), String> {
    if comment.trim().is_empty() {
        return Err("Escribe un comentario de cierre.".into());
    }
    if incident.evidence.is_empty() {
        return Err("Es obligatorio subir evidencias antes de finalizar.".into());
    }
    Ok(())
}

pub fn validate_reject(reason: &str) -> Result<(), String> {
    if reason.trim().is_empty() {
        return Err("Debes indicar el motivo del rechazo.".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::MediaRef;

    fn in_progress_with_evidence() -> Incident {
        Incident {
            id: 42,
            status: IncidentStatus::InProgress,
            evidence: vec![MediaRef {
                id: 1,
                url: "/media/42/1.jpg".into(),
            }],
            ..Incident::default()
        }
    }

    #[test]
    fn pending_offers_only_start() {
        assert_eq!(
            available_actions(IncidentStatus::Pending),
            &[IncidentAction::Start]
        );
    }

    #[test]
    fn in_progress_offers_upload_finalize_reject() {
        let actions = available_actions(IncidentStatus::InProgress);
        assert!(actions.contains(&IncidentAction::UploadEvidence));
        assert!(actions.contains(&IncidentAction::Finalize));
        assert!(actions.contains(&IncidentAction::Reject));
        assert!(!actions.contains(&IncidentAction::Start));
    }

    #[test]
    fn terminal_states_offer_nothing() {
        assert!(available_actions(IncidentStatus::Finalized).is_empty());
        assert!(available_actions(IncidentStatus::Rejected).is_empty());
        assert!(IncidentStatus::Finalized.is_terminal());
        assert!(IncidentStatus::Rejected.is_terminal());
        assert!(!IncidentStatus::InProgress.is_terminal());
    }

    #[test]
    fn finalize_requires_comment_and_evidence() {
        let incident = in_progress_with_evidence();
        assert!(validate_finalize(&incident, "Bache reparado").is_ok());
        assert!(validate_finalize(&incident, "   ").is_err());

        let without_evidence = Incident {
            evidence: Vec::new(),
            ..incident
        };
        assert!(validate_finalize(&without_evidence, "Bache reparado").is_err());
    }

    #[test]
    fn reject_requires_reason() {
        assert!(validate_reject("No es competencia municipal").is_ok());
        assert!(validate_reject("").is_err());
        assert!(validate_reject("  \n").is_err());
    }

    #[test]
    fn upload_requires_a_selection() {
        assert!(validate_evidence_selection(0).is_err());
        assert!(validate_evidence_selection(2).is_ok());
    }
}
