//! VOU administration: users, games, enterprises, events, vouchers and statistics.
//!
//! Same layering as everywhere else in this crate: `domain` inputs, `repository`
//! traits, a sea-orm implementation under `repo`, and one service per aggregate.

pub mod domain;
pub mod repository;
pub mod repo;

pub mod users;
pub mod games;
pub mod enterprises;
pub mod events;
pub mod vouchers;
pub mod statistics;

pub use enterprises::EnterpriseService;
pub use events::EventService;
pub use games::GameService;
pub use statistics::StatisticService;
pub use users::UserService;
pub use vouchers::VoucherService;
