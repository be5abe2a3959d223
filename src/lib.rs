pub mod data;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod harvest;
pub mod login;
pub mod probe;

pub use data::{CandidateLink, CourseMap, CourseRecord};
pub use error::HarvestError;

use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Shared subscriber setup for every binary; `LOG_LEVEL` overrides the
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();
}
