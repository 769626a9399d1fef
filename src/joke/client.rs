use crate::config::Config;
use crate::joke::api_types::parse_joke;
use crate::joke::types::Joke;
use color_eyre::{eyre::eyre, Result};
use std::time::Duration;
use url::Url;

/// Joke API client wrapper
#[derive(Clone)]
pub struct JokeClient {
  client: reqwest::Client,
  endpoint: Url,
}

impl JokeClient {
  pub fn new(config: &Config) -> Result<Self> {
    let endpoint = config.api_url()?;
    Self::with_endpoint(endpoint, config.request_timeout())
  }

  pub fn with_endpoint(endpoint: Url, timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .user_agent(concat!("jokebox/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, endpoint })
  }

  pub fn endpoint(&self) -> &Url {
    &self.endpoint
  }

  /// Fetch one random joke
  pub async fn random_joke(&self) -> Result<Joke> {
    let response = self
      .client
      .get(self.endpoint.clone())
      .send()
      .await
      .map_err(|e| eyre!("Failed to request joke: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Joke API returned an error: {}", e))?;

    let body = response
      .text()
      .await
      .map_err(|e| eyre!("Failed to read joke response: {}", e))?;

    let joke = parse_joke(&body).map_err(|e| eyre!("Failed to parse joke: {}", e))?;
    tracing::debug!(id = joke.id, "fetched joke");

    Ok(joke)
  }

  /// Fetch `count` jokes concurrently; fails if any single request fails
  pub async fn random_jokes(&self, count: usize) -> Result<Vec<Joke>> {
    let requests = (0..count).map(|_| self.random_joke());
    futures::future::try_join_all(requests).await
  }
}
