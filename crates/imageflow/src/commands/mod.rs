pub mod auth;
pub mod check;
pub mod next_build;
