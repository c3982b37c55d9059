//! # Chat Relay Library
//!
//! This crate provides an in-memory, multi-room chat relay behind a
//! long-polling HTTP API:
//! - Clients join a room and get a unique client id
//! - Posted messages fan out to every other room member
//! - Receives block up to a bounded timeout until a message arrives
//!   or the client leaves
//!
//! Nothing is persisted; the relay lives and dies with the process.
//!
//! ## Module Structure
//!
//! ```text
//! chat_relay/
//! +-- config/        Configuration management
//! +-- relay/         The relay core (registry, channels, membership)
//! +-- metrics/       Prometheus metrics
//! +-- presentation/  HTTP routes, handlers, and middleware
//! +-- shared/        Common utilities (HTTP error envelope)
//! ```

// Configuration module
pub mod config;

// Relay core - rooms, channels, fan-out
pub mod relay;

// Prometheus metrics
pub mod metrics;

// Presentation layer - HTTP routes and handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
