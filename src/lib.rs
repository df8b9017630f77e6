//! Postdesk — a blog client over a hosted identity, document and file
//! storage platform.
//!
//! ARCHITECTURE
//! ============
//! - `platform`: the remote API traits and their HTTPS implementation.
//! - `gateway`: auth and content operations with the app's error policy.
//! - `session` / `bootstrap`: the single source of truth for who is signed
//!   in, and the startup check that seeds it.
//! - `routes`: the route table and the authentication guard.
//! - `pages` / `app`: page data flow and the shell that mounts one page at a
//!   time inside a cancellable [`scope::ViewScope`].

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod gateway;
pub mod pages;
pub mod platform;
pub mod routes;
pub mod scope;
pub mod session;
pub mod slug;
