//! GraphQL backend for a small project-tracking application.
//!
//! Users, projects, and customers are persisted in a MongoDB document store.
//! The crate is laid out hexagonally: `domain` holds the entities, ports,
//! and application service; `outbound` holds the persistence adapters;
//! `inbound` holds the GraphQL and HTTP adapters; `server` wires them up.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
