//! Minimal NCBI E-utilities client.
//!
//! Endpoints used:
//!   esearch:  https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!   esummary: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi
//!
//! Both are called in JSON mode. `tool`, `email` and `api_key` are sent on
//! every request when configured.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::AuthorityError;

pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

pub struct EutilsClient {
    client: reqwest::Client,
    base_url: String,
    tool: String,
    email: Option<String>,
    api_key: Option<String>,
}

impl EutilsClient {
    pub fn new(
        tool: impl Into<String>,
        email: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthorityError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            tool: tool.into(),
            email: email.filter(|e| !e.is_empty()),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("retmode", "json".to_string()),
            ("tool", self.tool.clone()),
        ];
        if let Some(email) = &self.email {
            params.push(("email", email.clone()));
        }
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    async fn get_json(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value, AuthorityError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let resp = self.client.get(&url).query(params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AuthorityError::Api { status: status.as_u16(), message });
        }
        Ok(resp.json().await?)
    }

    /// Search `db` and return the matching UIDs, best first.
    #[instrument(skip(self))]
    pub async fn esearch(&self, db: &str, term: &str, retmax: usize) -> Result<Vec<String>, AuthorityError> {
        let mut params = self.base_params();
        params.push(("db", db.to_string()));
        params.push(("term", term.to_string()));
        params.push(("retmax", retmax.to_string()));

        let resp = self.get_json("esearch.fcgi", &params).await?;
        let ids = search_ids(&resp)?;
        debug!(?ids, "esearch returned ids");
        Ok(ids)
    }

    /// Fetch the document summary payload for one UID.
    #[instrument(skip(self))]
    pub async fn esummary(&self, db: &str, id: &str) -> Result<Value, AuthorityError> {
        let mut params = self.base_params();
        params.push(("db", db.to_string()));
        params.push(("id", id.to_string()));
        self.get_json("esummary.fcgi", &params).await
    }
}

/// `esearchresult.idlist` of an esearch payload.
pub fn search_ids(resp: &Value) -> Result<Vec<String>, AuthorityError> {
    let result = resp
        .get("esearchresult")
        .ok_or_else(|| AuthorityError::Malformed("missing esearchresult".into()))?;

    if let Some(err) = result.get("ERROR").and_then(Value::as_str) {
        return Err(AuthorityError::Malformed(err.to_string()));
    }

    Ok(result["idlist"]
        .as_array()
        .map(|ids| ids.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default())
}

/// The `result.<uid>` object of an esummary payload.
pub fn summary_doc<'a>(resp: &'a Value, uid: &str) -> Result<&'a Value, AuthorityError> {
    resp.get("result")
        .and_then(|r| r.get(uid))
        .filter(|doc| doc.is_object())
        .ok_or_else(|| AuthorityError::Malformed(format!("esummary has no document for uid {uid}")))
}
