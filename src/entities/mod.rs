pub mod campus_ambassadors;
pub mod user_registrations;
