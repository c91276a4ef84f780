use crate::incident::{Incident, IncidentStatus};
use serde::{Deserialize, Serialize};

/// Dashboard counters aggregated client-side from the full incident list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub finalized: usize,
}

impl DashboardStats {
    /// Incidents in neither counted bucket (pending or rejected).
    pub fn remainder(&self) -> usize {
        self.total.saturating_sub(self.in_progress + self.finalized)
    }
}

pub fn aggregate(incidents: &[Incident]) -> DashboardStats {
    let mut stats = DashboardStats {
        total: incidents.len(),
        ..DashboardStats::default()
    };
    for incident in incidents {
        match incident.status {
            IncidentStatus::InProgress => stats.in_progress += 1,
            IncidentStatus::Finalized => stats.finalized += 1,
            IncidentStatus::Pending | IncidentStatus::Rejected => {}
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(id: i64, status: IncidentStatus) -> Incident {
        Incident {
            id,
            status,
            ..Incident::default()
        }
    }

    #[test]
    fn aggregate_counts_by_status() {
        let incidents = vec![
            with_status(1, IncidentStatus::Pending),
            with_status(2, IncidentStatus::InProgress),
            with_status(3, IncidentStatus::InProgress),
            with_status(4, IncidentStatus::Finalized),
            with_status(5, IncidentStatus::Rejected),
        ];

        let stats = aggregate(&incidents);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.finalized, 1);
        assert_eq!(stats.remainder(), 2);
        assert!(stats.total >= stats.in_progress + stats.finalized);
    }

    #[test]
    fn aggregate_of_empty_list_is_zero() {
        let stats = aggregate(&[]);
        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.remainder(), 0);
    }
}
