//! HTTP client for the Hangar server.

use crate::CliResult;
use hangar_core::{NewShip, Ship, ShipUpdate};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Default server address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Thin wrapper around the `/rest/ships` endpoints.
pub struct HangarClient {
    client: Client,
    base_url: String,
}

impl HangarClient {
    /// Build a client for the server at `server_url`.
    pub fn new(server_url: &str) -> CliResult<Self> {
        let base_url = normalize_server_url(server_url)?;
        let client = Client::builder().user_agent("hangar-cli").build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/ships{path}", self.base_url)
    }

    /// Fetch one page of ships.
    pub async fn list_ships(&self, query: &[(&'static str, String)]) -> CliResult<Vec<Ship>> {
        let response = self.client.get(self.url("")).query(query).send().await?;
        decode(response).await
    }

    /// Count ships matching the filters.
    pub async fn count_ships(&self, query: &[(&'static str, String)]) -> CliResult<usize> {
        let response = self
            .client
            .get(self.url("/count"))
            .query(query)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch a single ship.
    pub async fn get_ship(&self, id: i64) -> CliResult<Ship> {
        let response = self.client.get(self.url(&format!("/{id}"))).send().await?;
        decode(response).await
    }

    /// Create a ship.
    pub async fn create_ship(&self, ship: &NewShip) -> CliResult<Ship> {
        let response = self.client.post(self.url("")).json(ship).send().await?;
        decode(response).await
    }

    /// Apply a partial update.
    pub async fn update_ship(&self, id: i64, update: &ShipUpdate) -> CliResult<Ship> {
        let response = self
            .client
            .post(self.url(&format!("/{id}")))
            .json(update)
            .send()
            .await?;
        decode(response).await
    }

    /// Delete a ship.
    pub async fn delete_ship(&self, id: i64) -> CliResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/{id}")))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> CliResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ApiError>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(format!("server returned {}: {message}", status.as_u16()).into())
}

async fn decode<T: DeserializeOwned>(response: Response) -> CliResult<T> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

fn normalize_server_url(server_url: &str) -> CliResult<String> {
    let trimmed = server_url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(format!("server URL must start with http:// or https://: {server_url}").into())
    }
}
