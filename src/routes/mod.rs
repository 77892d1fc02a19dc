mod ambassadors;
mod error;
mod extract;
mod health_check;
mod registrations;

pub use ambassadors::ambassador_routes;
pub use extract::{JsonBody, RecordId, SubmissionForm};
pub use health_check::health_check;
pub use registrations::registration_routes;
