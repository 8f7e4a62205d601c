//! Domain errors.
//!
//! Every variant maps onto the single message slot shown to the user via
//! `user_message()`. The typed variants stay available to code that needs to
//! tell a duplicate apart from a missing city.

use thiserror::Error;

/// Failure of an orchestrated fetch (either of the two requests).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("city not found")]
    CityNotFound,

    #[error("rate limited by weather provider")]
    RateLimited,

    #[error("weather request failed: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CityNotFound => "City not found!",
            Self::RateLimited => "API limit exceeded!",
            Self::Unknown(_) => "Something went wrong!",
        }
    }
}

/// Failure of a favorites mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("city {0} is already in favorites")]
    Duplicate(u64),

    #[error("failed to persist favorites: {0}")]
    Persist(String),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "City already added!",
            Self::Persist(_) => "Something went wrong!",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DashboardError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Fetch(e) => e.user_message(),
            Self::Store(e) => e.user_message(),
        }
    }
}
