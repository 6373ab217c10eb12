pub mod errors;
pub mod db;
pub mod enums;
pub mod patch;
pub mod statistic;

pub mod user;
pub mod game;
pub mod enterprise;
pub mod event;
pub mod voucher;
pub mod feedback;
pub mod token;

pub use enums::{Status, UserRole};
pub use patch::Patch;
pub use statistic::Statistic;
