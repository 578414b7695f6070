//! Shared HTTP client for the public data services

use anyhow::{Context, Result};
use reqwest::Client;

/// Build the client shared by the geocoder, weather and fact fetchers.
///
/// No client-wide timeout is set: only the fact request carries one.
pub fn build_client(user_agent: &str) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .with_context(|| "Failed to create HTTP client")
}
