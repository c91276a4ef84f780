pub mod incident;
pub mod stats;
pub mod workflow;

pub use incident::{AddressRef, Incident, IncidentStatus, MediaRef};
pub use stats::DashboardStats;
pub use workflow::IncidentAction;
