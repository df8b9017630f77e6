//! Gateways — stateless wrappers that translate platform calls into the
//! outcomes pages expect.
//!
//! ARCHITECTURE
//! ============
//! Gateways hold `Arc<dyn ...>` platform handles and no state of their own.
//! They decide which failures propagate and which collapse into
//! `None`/`false`, and they are the only place that logs platform errors.

pub mod auth;
pub mod content;

pub use auth::{AuthError, AuthGateway, SessionCheck};
pub use content::{ContentError, ContentGateway, default_post_queries};
