//! Table client with builder pattern.
//!
//! Maps the typed table operations onto the store's REST endpoints:
//!
//! | Operation    | Request                                 |
//! |--------------|-----------------------------------------|
//! | create table | `POST /tables`                          |
//! | insert       | `POST /tables/{table}/rows`             |
//! | select       | `GET /tables/{table}/rows?where=...`    |
//! | update       | `PUT /tables/{table}/rows`              |
//! | delete       | `DELETE /tables/{table}/rows?where=...` |

use crate::{
    error::{Failure, Result, TableLinkError},
    models::{
        Column, ConditionSet, CreateTableOutcome, CreateTableRequest, DeleteResponse, HttpVersion,
        Row, TableProbe, UpdateRequest, UpdateResponse,
    },
    timeouts::LinkTimeouts,
    transport::HttpTransport,
};
use log::{debug, info};
use reqwest::{header::CONTENT_TYPE, Method, Url};
use serde::Serialize;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Client for a remote table store.
///
/// Holds only the base URL and the HTTP client; cloning is cheap and clones
/// share connections. Calls are independent round trips with no ordering
/// between them.
///
/// # Examples
///
/// ```rust,no_run
/// use table_link::{Column, ConditionSet, DataType, Row, TableClient};
///
/// # async fn example() -> table_link::Result<()> {
/// let client = TableClient::new("http://localhost:8080")?;
///
/// client
///     .create_table(
///         "users",
///         &[
///             Column::new("id", DataType::Int),
///             Column::new("name", DataType::String),
///         ],
///     )
///     .await?;
///
/// client
///     .insert("users", &Row::new().with("id", 1).with("name", "John Doe"))
///     .await?;
///
/// let rows = client
///     .select("users", &ConditionSet::all().with("id", 1))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TableClient {
    base_url: Url,
    transport: HttpTransport,
    timeouts: LinkTimeouts,
}

impl TableClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> TableClientBuilder {
        TableClientBuilder::new()
    }

    /// Client for `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn timeouts(&self) -> &LinkTimeouts {
        &self.timeouts
    }

    /// Create a table unless it already exists.
    ///
    /// Probes the table first with a condition-free select. If the server
    /// answers with a row list, nothing is created. Otherwise a creation
    /// request is sent; when two callers race past the probe, the server
    /// decides, and its `table {name} already exists` rejection is reported as
    /// [`CreateTableOutcome::AlreadyExists`] rather than an error. Any other
    /// rejection is a [`TableLinkError::CreateTable`] error.
    ///
    /// A transport failure during the probe is returned as a
    /// [`TableLinkError::CreateTable`] error without attempting creation.
    pub async fn create_table(&self, name: &str, columns: &[Column]) -> Result<CreateTableOutcome> {
        require_table_name(name)?;
        if columns.is_empty() {
            return Err(TableLinkError::InvalidRequest(
                "a table needs at least one column".into(),
            ));
        }
        if columns.iter().any(|c| c.name.is_empty()) {
            return Err(TableLinkError::InvalidRequest(
                "column names must not be empty".into(),
            ));
        }

        match self.probe_table(name).await? {
            TableProbe::Found => {
                info!("[TABLE_LINK] Table '{}' already exists, skipping creation", name);
                return Ok(CreateTableOutcome::AlreadyExists);
            }
            TableProbe::Unreachable(msg) => {
                return Err(TableLinkError::CreateTable(Failure::Transport(msg)));
            }
            TableProbe::Missing(reason) => {
                debug!("[TABLE_LINK] Table '{}' not found ({}), creating", name, reason);
            }
        }

        let url = self.endpoint(&["tables"])?;
        let request = CreateTableRequest { name, columns };

        match self
            .transport
            .send(self.transport.request(Method::POST, url).json(&request))
            .await
        {
            Ok(_) => {
                info!("[TABLE_LINK] Created table '{}' with {} columns", name, columns.len());
                Ok(CreateTableOutcome::Created)
            }
            Err(Failure::Server { body, .. }) if reports_existing_table(&body, name) => {
                info!("[TABLE_LINK] Table '{}' was created concurrently", name);
                Ok(CreateTableOutcome::AlreadyExists)
            }
            Err(failure) => Err(TableLinkError::CreateTable(failure)),
        }
    }

    /// Check whether a table exists by selecting from it.
    pub async fn probe_table(&self, name: &str) -> Result<TableProbe> {
        match self.select(name, &ConditionSet::all()).await {
            Ok(_) => Ok(TableProbe::Found),
            Err(TableLinkError::Select(failure)) => Ok(TableProbe::from_select_failure(failure)),
            Err(other) => Err(other),
        }
    }

    /// Insert one row, sent exactly as given.
    ///
    /// A NaN or infinite float is rejected with
    /// [`TableLinkError::InvalidRequest`] before anything is sent; the same
    /// holds for conditions and updates in the other row operations.
    pub async fn insert(&self, table: &str, row: &Row) -> Result<()> {
        require_table_name(table)?;
        if row.is_empty() {
            return Err(TableLinkError::InvalidRequest(
                "cannot insert an empty row".into(),
            ));
        }

        let url = self.rows_url(table)?;
        let body = json_body(row)?;
        self.transport
            .send(json_request(self.transport.request(Method::POST, url), body))
            .await
            .map_err(TableLinkError::Insert)?;

        debug!("[TABLE_LINK] Inserted row into '{}'", table);
        Ok(())
    }

    /// Rows matching every condition, in the order the server returns them.
    pub async fn select(&self, table: &str, conditions: &ConditionSet) -> Result<Vec<Row>> {
        require_table_name(table)?;

        let url = self.rows_url(table)?;
        let filter = where_param(conditions)?;
        let rows: Vec<Row> = self
            .transport
            .send_json(
                self.transport
                    .request(Method::GET, url)
                    .query(&[("where", filter)]),
            )
            .await
            .map_err(TableLinkError::Select)?;

        debug!("[TABLE_LINK] Selected {} rows from '{}'", rows.len(), table);
        Ok(rows)
    }

    /// All rows of a table.
    pub async fn select_all(&self, table: &str) -> Result<Vec<Row>> {
        self.select(table, &ConditionSet::all()).await
    }

    /// Apply `updates` to every row matching `conditions`.
    ///
    /// Returns the number of rows the server updated.
    pub async fn update(
        &self,
        table: &str,
        conditions: &ConditionSet,
        updates: &Row,
    ) -> Result<u64> {
        require_table_name(table)?;

        let url = self.rows_url(table)?;
        let body = json_body(&UpdateRequest {
            conditions,
            updates,
        })?;
        let response: UpdateResponse = self
            .transport
            .send_json(json_request(self.transport.request(Method::PUT, url), body))
            .await
            .map_err(TableLinkError::Update)?;

        debug!("[TABLE_LINK] Updated {} rows in '{}'", response.updated, table);
        Ok(response.updated)
    }

    /// Remove every row matching `conditions`; an empty set removes all rows.
    ///
    /// Returns the number of rows the server deleted.
    pub async fn delete(&self, table: &str, conditions: &ConditionSet) -> Result<u64> {
        require_table_name(table)?;

        let url = self.rows_url(table)?;
        let filter = where_param(conditions)?;
        let response: DeleteResponse = self
            .transport
            .send_json(
                self.transport
                    .request(Method::DELETE, url)
                    .query(&[("where", filter)]),
            )
            .await
            .map_err(TableLinkError::Delete)?;

        debug!("[TABLE_LINK] Deleted {} rows from '{}'", response.deleted, table);
        Ok(response.deleted)
    }

    fn rows_url(&self, table: &str) -> Result<Url> {
        self.endpoint(&["tables", table, "rows"])
    }

    /// Append path segments to the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TableLinkError::ConfigurationError(format!(
                    "base_url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn require_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TableLinkError::InvalidRequest(
            "table name must not be empty".into(),
        ));
    }
    Ok(())
}

/// JSON text for the `where` query parameter.
///
/// Fails for values with no JSON form (non-finite floats).
fn where_param(conditions: &ConditionSet) -> Result<String> {
    serde_json::to_string(conditions)
        .map_err(|e| TableLinkError::InvalidRequest(format!("unencodable conditions: {}", e)))
}

/// Serialize a request body up front so encoding errors surface as
/// `InvalidRequest` before anything is sent.
fn json_body<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| TableLinkError::InvalidRequest(format!("unencodable request body: {}", e)))
}

fn json_request(request: reqwest::RequestBuilder, body: Vec<u8>) -> reqwest::RequestBuilder {
    request.header(CONTENT_TYPE, "application/json").body(body)
}

/// True only for the server's duplicate-table rejection of `name`.
fn reports_existing_table(body: &str, name: &str) -> bool {
    body.trim() == format!("table {} already exists", name)
}

/// Builder for configuring [`TableClient`] instances.
pub struct TableClientBuilder {
    base_url: String,
    timeouts: LinkTimeouts,
    http_version: HttpVersion,
}

impl TableClientBuilder {
    fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: LinkTimeouts::default(),
            http_version: HttpVersion::default(),
        }
    }

    /// Set the base URL of the table server (default `http://localhost:8080`)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.receive_timeout = timeout;
        self
    }

    /// Set all timeouts at once; overrides an earlier `timeout()`
    pub fn timeouts(mut self, timeouts: LinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the HTTP protocol version
    pub fn http_version(mut self, version: HttpVersion) -> Self {
        self.http_version = version;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<TableClient> {
        let mut base_url = Url::parse(self.base_url.trim()).map_err(|e| {
            TableLinkError::ConfigurationError(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TableLinkError::ConfigurationError(format!(
                "base_url must use http or https, got '{}'",
                base_url.scheme()
            )));
        }
        if base_url.cannot_be_a_base() {
            return Err(TableLinkError::ConfigurationError(format!(
                "base_url '{}' cannot carry a path",
                base_url
            )));
        }
        base_url.set_query(None);
        base_url.set_fragment(None);

        let mut client_builder =
            reqwest::Client::builder().connect_timeout(self.timeouts.connection_timeout);
        if !LinkTimeouts::is_no_timeout(self.timeouts.receive_timeout) {
            client_builder = client_builder.timeout(self.timeouts.receive_timeout);
        }

        client_builder = match self.http_version {
            HttpVersion::Http1 => {
                debug!("[TABLE_LINK] Using HTTP/1.1 only");
                client_builder.http1_only()
            }
            HttpVersion::Http2 => {
                debug!("[TABLE_LINK] Using HTTP/2 with prior knowledge");
                client_builder.http2_prior_knowledge()
            }
            HttpVersion::Auto => {
                debug!("[TABLE_LINK] Using automatic HTTP version negotiation");
                client_builder
            }
        };

        let http_client = client_builder
            .build()
            .map_err(|e| TableLinkError::ConfigurationError(e.to_string()))?;

        Ok(TableClient {
            base_url,
            transport: HttpTransport::new(http_client),
            timeouts: self.timeouts,
        })
    }
}
