//! HTTP inference API.
//!
//! A single GET endpoint on every path: `q` is run through the loaded
//! NLP pipeline and the analysed document is returned as JSON. The router
//! is composable; `server` owns binding and lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::{ApiError, ServeError};
pub use router::analysis_router;
pub use server::{serve_until_ctrl_c, start_server_on, InferenceServer, ServerSession};
pub use types::ApiContext;
