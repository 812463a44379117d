mod app;
mod compare;
mod config;
mod decode;
mod http;
mod store;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use compare::CompareError;
pub use config::ConfigError;
pub use decode::DecodeError;
pub use http::HttpError;
pub use store::StoreError;
pub use validation::ValidationError;
