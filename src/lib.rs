//! docsearch - client for a document search and question-answering backend.
//!
//! Users upload PDF and text files, run keyword searches over them, and ask
//! questions answered from their content with citations. All indexing and
//! retrieval happens in the backend; this crate owns the request lifecycle
//! around it:
//!
//! - [`api`]: the backend gateway ([`api::DocumentApi`], [`api::HttpGateway`])
//! - [`normalize`]: mapping backend payloads onto canonical [`models`]
//! - [`store`]: per-feature state slices with request fencing
//! - [`actions`]: orchestration from user input to settled state
//! - [`local_files`]: upload candidates, validation, and the pending queue

pub mod actions;
pub mod api;
pub mod config;
pub mod local_files;
pub mod models;
pub mod normalize;
pub mod store;
pub mod utils;

pub use actions::Completion;
pub use api::{DocumentApi, HttpGateway, TransportError};
pub use config::ClientConfig;
pub use store::Store;
