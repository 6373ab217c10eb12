//! Service layer: validation helpers, business services and their repositories.
//! - `admin` backs the VOU administration API (sea-orm).
//! - `mysafe` backs the parental-control gateway (remote platform + local store).

pub mod errors;
pub mod validate;
pub mod password;
pub mod admin;
pub mod mysafe;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
