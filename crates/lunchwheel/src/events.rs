use crate::config::Config;
use placepick::search::{SearchError, SearchOutcome, SearchRequest};
use strum::{AsRefStr, IntoStaticStr};

const SEARCH_FAILED: &str =
    "Error searching for restaurants. Please check your API key or try again.";
const NO_MATCHES: &str = "No restaurants found for the entered keyword. \
Try a different keyword or leaving the keyword blank for all restaurants.";

/// Background runtime → UI.
#[derive(Debug, Clone)]
pub enum AppEvent {
    SearchFinished(SearchOutcome),
    SearchFailed(SearchFailure),
    ConfigReload,
}

/// UI → background runtime.
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    Search(SearchRequest),
    Reconfigure(Box<Config>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Location,
    Service,
    NoMatches,
}

/// Doubles as a GTK style class on the alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchFailure {
    pub fn service(detail: impl std::fmt::Display) -> Self {
        log::error!("Search failed: {}", detail);
        Self {
            kind: FailureKind::Service,
            message: SEARCH_FAILED.to_string(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            FailureKind::Location | FailureKind::Service => Severity::Error,
            FailureKind::NoMatches => Severity::Warning,
        }
    }
}

impl From<&SearchError> for SearchFailure {
    fn from(err: &SearchError) -> Self {
        match err {
            SearchError::Location(_) => Self {
                kind: FailureKind::Location,
                message: err.to_string(),
            },
            SearchError::Places(e) => Self::service(e),
            SearchError::NoMatches(_) => Self {
                kind: FailureKind::NoMatches,
                message: NO_MATCHES.to_string(),
            },
        }
    }
}
