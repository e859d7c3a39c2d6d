//! # todo-web
//!
//! A server-rendered task list. Tasks live in SQLite (or in memory), pages
//! are rendered on the server, and every mutation is a form post answered
//! with `303 See Other`.
//!
//! ## Filter propagation
//!
//! The index can show all, active or completed tasks. Mutating posts carry
//! no query string, so the filter the user was looking at is recovered from
//! the `Referer` header and re-embedded into the redirect `Location` by
//! [`api::middleware::TodoFilterLayer`]. The sequence
//! `GET /?filter=F -> POST -> 303 -> GET` lands on the same `F`.
//!
//! ## Layers
//!
//! - [`domain`]: tasks and filters, no I/O
//! - [`infrastructure`]: stores, configuration, store factory
//! - [`application`]: task service and index view composition
//! - [`api`]: router, handlers, middleware, templates
//! - [`server`]: listener and graceful shutdown

#![forbid(unsafe_code)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod server;
