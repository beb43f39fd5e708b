use dex_integration::IntegrationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Startup failed while {phase}: {source}")]
    Startup {
        phase: &'static str,
        #[source]
        source: IntegrationError,
    },

    #[error("Startup already ran")]
    AlreadyStarted,

    #[error("No catalog entry with id {0}")]
    UnknownItem(u32),

    #[error("Details for {0} are unavailable")]
    Unavailable(String),
}
