//! # table-link
//!
//! Async client for a remote tabular data store exposed over HTTP/JSON.
//!
//! Declare a table schema, insert rows, and select, update or delete rows by
//! equality conditions without building HTTP requests by hand. Each call is
//! exactly one request/response exchange (two for [`TableClient::create_table`],
//! which probes first); nothing is cached, retried or kept between calls.
//!
//! ```rust,no_run
//! use table_link::{Column, ConditionSet, DataType, Row, TableClient};
//!
//! # async fn example() -> table_link::Result<()> {
//! let client = TableClient::builder()
//!     .base_url("http://localhost:8080")
//!     .build()?;
//!
//! client
//!     .create_table(
//!         "users",
//!         &[
//!             Column::new("id", DataType::Int),
//!             Column::new("name", DataType::String),
//!             Column::new("active", DataType::Bool),
//!         ],
//!     )
//!     .await?;
//!
//! client
//!     .insert(
//!         "users",
//!         &Row::new().with("id", 1).with("name", "John Doe").with("active", true),
//!     )
//!     .await?;
//!
//! let updated = client
//!     .update(
//!         "users",
//!         &ConditionSet::all().with("name", "John Doe"),
//!         &Row::new().with("active", false),
//!     )
//!     .await?;
//! assert_eq!(updated, 1);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod timeouts;
mod transport;

pub use client::{TableClient, TableClientBuilder, DEFAULT_BASE_URL};
pub use error::{Failure, Result, TableLinkError};
pub use models::{
    Column, ConditionSet, CreateTableOutcome, DataType, HttpVersion, Row, TableProbe, Value,
};
pub use timeouts::{LinkTimeouts, LinkTimeoutsBuilder};
