pub mod auth;
pub mod rules;
