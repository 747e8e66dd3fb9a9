pub mod error;
pub use error::Result;
pub use error::Error;
pub use error::ConfigurationError;

pub mod config;
pub use config::PlannerOptions;

pub mod catalog;
pub use catalog::Catalog;
pub use catalog::CourseCode;

pub mod sections;
pub use sections::SectionCatalog;

pub mod suggestion_resolver;
pub use suggestion_resolver::compute_suggestions;
pub use suggestion_resolver::Suggestions;
