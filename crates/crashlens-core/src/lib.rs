pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod render;
pub mod schema;
pub mod severity;
pub mod temporal;
pub mod validation;

pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use render::{render, DashboardViews, RenderRequest};
pub use severity::Severity;
pub use temporal::DateErrorPolicy;
