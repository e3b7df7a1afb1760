//! Data models for table-link.
//!
//! Defines the schema, row and condition types callers work with, plus the
//! request and response bodies exchanged with the server.

pub mod column;
pub mod condition_set;
pub mod create_table_outcome;
pub mod create_table_request;
pub mod data_type;
pub mod delete_response;
pub mod http_version;
pub mod row;
pub mod table_probe;
pub mod update_request;
pub mod update_response;
pub mod value;


pub use column::Column;
pub use condition_set::ConditionSet;
pub use create_table_outcome::CreateTableOutcome;
pub use create_table_request::CreateTableRequest;
pub use data_type::DataType;
pub use delete_response::DeleteResponse;
pub use http_version::HttpVersion;
pub use row::Row;
pub use table_probe::TableProbe;
pub use update_request::UpdateRequest;
pub use update_response::UpdateResponse;
pub use value::Value;
