//! MCP Common - shared plumbing for MCP servers
//!
//! - **Initialization**: [`init_tracing`] routes logs to stderr, since stdout
//!   carries the protocol
//! - **Results**: helpers for building `CallToolResult` payloads, including
//!   error-flagged text results
//! - **Errors**: shorthand constructors for protocol-level errors
//! - **Embeddable**: [`EmbeddableMcp`] for calling tools in-process by name
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{json_success, text_error};
//!
//! match run_query().await {
//!     Ok(table) => json_success(&table),
//!     Err(e) => Ok(text_error(format!("Error querying: {e}"))),
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params};
pub use init::{default_directive, init_tracing};
pub use result::{first_text, json_success, text_error};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;
