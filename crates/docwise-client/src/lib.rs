//! DocumentWise API client
//!
//! The [`DocumentWiseApi`] trait is the single seam between the DocumentWise
//! front end and its backend:
//!
//! - [`HttpApi`] talks to the real proposals and chat services with reqwest
//! - [`InMemoryApi`] keeps everything in process, for demos and tests
//!
//! [`Actions`] wraps either one, validating input before any request and
//! folding every failure into an [`Outcome`] with a user-facing message.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use docwise_client::{Actions, ApiConfig, HttpApi};
//!
//! # async fn run() -> Result<(), docwise_client::ClientError> {
//! let api = HttpApi::new(&ApiConfig::from_env())?;
//! let actions = Actions::new(Arc::new(api));
//!
//! let outcome = actions.list_proposals().await;
//! match outcome.into_result() {
//!     Ok(proposals) => println!("{} proposals", proposals.len()),
//!     Err(message) => eprintln!("{message}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod memory;
pub mod operation;
pub mod outcome;

pub use actions::Actions;
pub use api::{ApiResult, DocumentWiseApi};
pub use config::ApiConfig;
pub use endpoints::Endpoints;
pub use error::ClientError;
pub use http::HttpApi;
pub use memory::InMemoryApi;
pub use operation::Operation;
pub use outcome::{ErrorKind, Outcome};
