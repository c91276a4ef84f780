pub mod dashboard;
pub mod incident_detail;
pub mod incidents;
pub mod login;
