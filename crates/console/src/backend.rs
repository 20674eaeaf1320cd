//! The seam between console controllers and the server.
//!
//! Controllers are written against [`Backend`]; [`HttpBackend`] speaks the
//! `/api/v1` and `/functions/v1` HTTP surface with [`reqwest`].

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use seatfinder_core::browser::RowSet;
use seatfinder_core::value::Row;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::ConsoleError;

/// Result of one statement through the privileged SQL gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SqlOutcome {
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
    #[serde(rename = "execMs")]
    pub exec_ms: u64,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Bearer token used for every following call; `None` after sign-out.
    fn set_access_token(&self, token: Option<String>);

    async fn list_rows(
        &self,
        table: &str,
        limit: i64,
        order: Option<&str>,
        descending: bool,
    ) -> Result<RowSet, ConsoleError>;

    async fn insert_row(&self, table: &str, fields: &Row) -> Result<Row, ConsoleError>;

    async fn update_row(&self, table: &str, id: &str, fields: &Row) -> Result<Row, ConsoleError>;

    async fn delete_row(&self, table: &str, id: &str) -> Result<(), ConsoleError>;

    /// Whether the signed-in user holds any role row.
    async fn fetch_is_admin(&self) -> Result<bool, ConsoleError>;

    async fn execute_sql(&self, sql: &str) -> Result<SqlOutcome, ConsoleError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct RowSetBody {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RolesBody {
    is_admin: bool,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for one server.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    /// * `base_url` - server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// `base_url` plus `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ConsoleError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn rows_url(&self, table: &str) -> Result<Url, ConsoleError> {
        self.endpoint(&["api", "v1", "admin", "tables", table, "rows"])
    }

    fn row_url(&self, table: &str, id: &str) -> Result<Url, ConsoleError> {
        self.endpoint(&["api", "v1", "admin", "tables", table, "rows", id])
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`ConsoleError::Api`], keeping the
    /// server's `error` message when the body has one.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ConsoleError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        Err(ConsoleError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ConsoleError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn set_access_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn list_rows(
        &self,
        table: &str,
        limit: i64,
        order: Option<&str>,
        descending: bool,
    ) -> Result<RowSet, ConsoleError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(order) = order {
            query.push(("order", order.to_string()));
            query.push(("desc", descending.to_string()));
        }
        let response = self
            .authorized(self.client.get(self.rows_url(table)?))
            .query(&query)
            .send()
            .await?;
        let body: DataEnvelope<RowSetBody> = Self::parse_response(response).await?;
        Ok(RowSet {
            columns: body.data.columns,
            rows: body.data.rows,
        })
    }

    async fn insert_row(&self, table: &str, fields: &Row) -> Result<Row, ConsoleError> {
        let response = self
            .authorized(self.client.post(self.rows_url(table)?))
            .json(fields)
            .send()
            .await?;
        let body: DataEnvelope<Row> = Self::parse_response(response).await?;
        Ok(body.data)
    }

    async fn update_row(&self, table: &str, id: &str, fields: &Row) -> Result<Row, ConsoleError> {
        let response = self
            .authorized(self.client.put(self.row_url(table, id)?))
            .json(fields)
            .send()
            .await?;
        let body: DataEnvelope<Row> = Self::parse_response(response).await?;
        Ok(body.data)
    }

    async fn delete_row(&self, table: &str, id: &str) -> Result<(), ConsoleError> {
        let response = self
            .authorized(self.client.delete(self.row_url(table, id)?))
            .send()
            .await?;
        Self::ensure_success(response).await.map(|_| ())
    }

    async fn fetch_is_admin(&self) -> Result<bool, ConsoleError> {
        let response = self
            .authorized(self.client.get(self.endpoint(&["api", "v1", "auth", "roles"])?))
            .send()
            .await?;
        let body: DataEnvelope<RolesBody> = Self::parse_response(response).await?;
        Ok(body.data.is_admin)
    }

    async fn execute_sql(&self, sql: &str) -> Result<SqlOutcome, ConsoleError> {
        let response = self
            .authorized(self.client.post(self.endpoint(&["functions", "v1", "execute-sql"])?))
            .json(&serde_json::json!({ "sql": sql }))
            .send()
            .await?;
        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let backend = HttpBackend::new("http://localhost:3000/");
        assert_eq!(
            backend.rows_url("teachers").unwrap().as_str(),
            "http://localhost:3000/api/v1/admin/tables/teachers/rows"
        );
    }

    #[test]
    fn row_id_is_encoded_as_one_segment() {
        let backend = HttpBackend::new("http://localhost:3000/console");
        assert_eq!(
            backend.row_url("site_settings", "a/b?c#d").unwrap().as_str(),
            "http://localhost:3000/console/api/v1/admin/tables/site_settings/rows/a%2Fb%3Fc%23d"
        );
    }

    #[tokio::test]
    async fn unusable_base_url_is_reported_before_sending() {
        let backend = HttpBackend::new("not a url");
        let err = backend.delete_row("teachers", "1").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Url(_)));
    }

    #[test]
    fn sql_outcome_reads_gateway_body() {
        let outcome: SqlOutcome =
            serde_json::from_str(r#"{"data":[{"n":3}],"execMs":12}"#).unwrap();
        assert_eq!(outcome.exec_ms, 12);
        assert_eq!(outcome.rows[0]["n"].as_plain_string(), "3");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        let backend = HttpBackend::new("http://127.0.0.1:1");
        let err = backend.fetch_is_admin().await.unwrap_err();
        assert!(matches!(err, ConsoleError::Request(_)));
    }
}
