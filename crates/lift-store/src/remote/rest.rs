//! PostgREST-style HTTP table (`{url}/rest/v1/{table}`), as served by a
//! Supabase project.

use std::time::Duration;

use lift_config::RemoteConfig;
use lift_core::Entry;
use serde::Serialize;

use super::RemoteStore;
use crate::error::RemoteError;

const SELECT_COLUMNS: &str = "id,date,exercise,weight,reps";

#[derive(Debug, Clone)]
pub struct RestRemote {
    http: reqwest::Client,
    table_url: String,
    anon_key: String,
    access_token: Option<String>,
}

/// Wire form of a row. `reps` is always present (as `null` when absent) so
/// bulk upserts send a uniform column set.
#[derive(Debug, Serialize)]
struct Row<'a> {
    id: &'a str,
    date: &'a str,
    exercise: &'a str,
    weight: f64,
    reps: Option<u32>,
    user_id: &'a str,
}

impl<'a> Row<'a> {
    fn new(entry: &'a Entry, owner: &'a str) -> Self {
        Self {
            id: &entry.id,
            date: &entry.date,
            exercise: &entry.exercise,
            weight: entry.weight,
            reps: entry.reps,
            user_id: owner,
        }
    }
}

impl RestRemote {
    /// Build a client for the configured table.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotConfigured` if URL or anon key is missing, or
    /// `RemoteError::Http` if the HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let config = config
            .require()
            .map_err(|e| RemoteError::NotConfigured(e.to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent("liftlog/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            table_url: config.table_url(),
            anon_key: config.anon_key.clone(),
            access_token: None,
        })
    }

    /// Authenticate requests as the signed-in user.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    fn request(&self, method: reqwest::Method, query: &str) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.http
            .request(method, format!("{}?{query}", self.table_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }
}

/// `eq.` filter value, percent-encoded for the query string.
fn eq(value: &str) -> String {
    format!("eq.{}", urlencoding::encode(value))
}

async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if !resp.status().is_success() {
        return Err(RemoteError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

impl RemoteStore for RestRemote {
    async fn select_by_owner(&self, owner: &str) -> Result<Vec<Entry>, RemoteError> {
        let query = format!(
            "select={SELECT_COLUMNS}&user_id={}&order=date.asc",
            eq(owner)
        );
        let resp = self.request(reqwest::Method::GET, &query).send().await?;
        let resp = check_response(resp).await?;
        let entries = resp
            .json::<Vec<Entry>>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        tracing::debug!(count = entries.len(), "fetched remote entries");
        Ok(entries)
    }

    async fn upsert(&self, owner: &str, entries: &[Entry]) -> Result<(), RemoteError> {
        if entries.is_empty() {
            return Ok(());
        }
        let rows: Vec<Row<'_>> = entries.iter().map(|e| Row::new(e, owner)).collect();
        let resp = self
            .request(reqwest::Method::POST, "on_conflict=id")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&rows)
            .send()
            .await?;
        check_response(resp).await?;
        tracing::debug!(count = rows.len(), "upserted remote entries");
        Ok(())
    }

    async fn delete_by_id(&self, owner: &str, id: &str) -> Result<(), RemoteError> {
        let query = format!("id={}&user_id={}", eq(id), eq(owner));
        let resp = self.request(reqwest::Method::DELETE, &query).send().await?;
        check_response(resp).await?;
        Ok(())
    }

    async fn delete_all(&self, owner: &str) -> Result<(), RemoteError> {
        let query = format!("user_id={}", eq(owner));
        let resp = self.request(reqwest::Method::DELETE, &query).send().await?;
        check_response(resp).await?;
        Ok(())
    }
}
