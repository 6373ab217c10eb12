//! mysafe gateway: thin facade over the parental-control platform plus the
//! gateway's own feedback and token storage.

pub mod client;
pub mod domain;
pub mod service;
pub mod store;

pub use client::{OtpRequest, ReqwestVcsClient, VcsClient, VcsRequest};
pub use service::{MysafeService, PlatformIdentity};
pub use store::{FeedbackStore, SeaOrmFeedbackStore, SeaOrmTokenStore, TokenStore};
