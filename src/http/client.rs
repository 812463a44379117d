use std::time::Duration;

use reqwest::{Client, redirect};

use crate::{args::DEFAULT_USER_AGENT, error::HttpError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REDIRECT_LIMIT: usize = 10;

/// Builds the shared client used by every request of a run.
///
/// Timeouts are applied per request, so the client itself only bounds
/// connection setup.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(max_idle_per_host: usize) -> Result<Client, HttpError> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
        .pool_max_idle_per_host(max_idle_per_host)
        .build()
        .map_err(|source| HttpError::BuildClientFailed { source })
}
