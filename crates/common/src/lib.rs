pub mod types;
pub mod utils;
pub mod env;
pub mod response;

pub use response::SuccessRes;
