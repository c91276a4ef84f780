use incident_core::incident::IncidentStatus;
use leptos::*;

pub fn status_class(status: IncidentStatus) -> &'static str {
    match status {
        IncidentStatus::Pending => "badge badge-pending",
        IncidentStatus::InProgress => "badge badge-progress",
        IncidentStatus::Finalized => "badge badge-done",
        IncidentStatus::Rejected => "badge badge-rejected",
    }
}

#[component]
pub fn StatusBadge(status: IncidentStatus) -> impl IntoView {
    view! { <span class=status_class(status)>{status.label()}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_status_gets_its_own_badge_class() {
        let classes = [
            status_class(IncidentStatus::Pending),
            status_class(IncidentStatus::InProgress),
            status_class(IncidentStatus::Finalized),
            status_class(IncidentStatus::Rejected),
        ];
        for (i, class) in classes.iter().enumerate() {
            for other in &classes[i + 1..] {
                assert_ne!(class, other);
            }
        }
    }
}
