//! # Copydeck Architecture
//!
//! Copydeck keeps a per-site, per-user collection of marketing copy (tweets,
//! emails, scripts...) in step with the list a user edits on the client. The
//! client sends its whole edited list; copydeck works out the fewest creates,
//! updates and deletes that make the store match, and applies them.
//!
//! It is a library first: the CLI is one client among many.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, reads draft files, prints results      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Turns failures into { success, error } responses         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - sync, plan (dry run), list, config                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Reconciliation Engine (reconcile/)                         │
//! │  - snapshot → resolve → classify → execute                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract CopyStore trait                                 │
//! │  - RecordStore over FsBackend (production) or MemBackend    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns `Result`s. It
//! never prints, never exits, and only reports progress through `tracing`
//! events, which the embedding application decides how to collect.
//!
//! ## Testing Strategy
//!
//! 1. **Engine** (`reconcile/*.rs`): the lion's share. Every bucket, guard
//!    and failure mode is covered against `InMemoryStore` and `RecordingStore`.
//! 2. **Commands / API**: dispatch and result shaping.
//! 3. **Binary** (`tests/`): end to end through the file backend.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`reconcile`]: The reconciliation engine
//! - [`store`]: Storage contract and implementations
//! - [`model`]: Records, drafts, scopes, identity keys
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod store;
