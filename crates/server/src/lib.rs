pub mod admin;
pub mod errors;
pub mod extract;
pub mod mysafe;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::{run_admin, run_mysafe};
