//! Fetcher over the admin REST search endpoints
//!
//! Each endpoint answers `GET <path>?q=<term>` with a JSON array of rows whose
//! field names vary between tables (`id`/`ID`/`idpers`, `label`/`LABEL`,
//! `prenom`/`nom`). Rows are mapped onto [`Item`]s here so pickers only ever
//! see ids and labels.

use serde::Deserialize;

use super::{FetchError, FetchFuture, Fetcher};
use crate::picker::{Item, ItemId};

/// Search endpoints exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    People,
    Themes,
    Structures,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::People => "/api/people/find",
            Endpoint::Themes => "/api/themes/find",
            Endpoint::Structures => "/api/structures/find",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    endpoint: Endpoint,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            endpoint,
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>`; blank tokens are ignored
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Share a client (and its connection pool) between fetchers
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.path()
        )
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, query: &str) -> FetchFuture {
        let mut request = self
            .client
            .get(self.url())
            .query(&[("q", query.trim())]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            if !status.is_success() {
                return Err(FetchError::Status {
                    code: status.as_u16(),
                    body,
                });
            }
            parse_rows(&body)
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchRow {
    #[serde(default, alias = "ID", alias = "idpers", alias = "IDPERS")]
    id: Option<ItemId>,
    #[serde(default, alias = "LABEL")]
    label: Option<String>,
    #[serde(default, alias = "PRENOM")]
    prenom: Option<String>,
    #[serde(default, alias = "NOM")]
    nom: Option<String>,
}

impl SearchRow {
    fn into_item(self) -> Option<Item> {
        let id = self.id?;
        let label = self
            .label
            .filter(|l| !l.trim().is_empty())
            .or_else(|| {
                let full = format!(
                    "{} {}",
                    self.prenom.unwrap_or_default(),
                    self.nom.unwrap_or_default()
                );
                let full = full.trim();
                (!full.is_empty()).then(|| full.to_string())
            })
            .unwrap_or_else(|| id.to_string());
        Some(Item::new(id, label))
    }
}

/// Map a backend response body onto items, skipping rows without a usable id
pub fn parse_rows(body: &str) -> Result<Vec<Item>, FetchError> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(rows_to_items(rows))
}

/// Map already-decoded backend rows onto items
pub fn rows_to_items(rows: Vec<serde_json::Value>) -> Vec<Item> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<SearchRow>(row) {
            Ok(row) => row.into_item(),
            Err(e) => {
                log::warn!("Skipping unusable search row: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;
