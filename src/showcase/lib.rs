//! # Showcase Architecture
//!
//! Showcase is a **UI-agnostic listing library** for three small sites: a
//! developer project directory with votes, a blog, and a restaurant (menu,
//! gallery and static pages). The binary is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, handles terminal I/O│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (id prefixes → UUIDs, raw page strings)│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Listing handler: search, then paginate                   │
//! │  - Vote tally, cascades, slug assignment                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait with optimistic versions               │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pure building blocks sit beside the layers: [`search`] (case-insensitive
//! substring filter), [`paginate`] (page parsing, clamping and the page
//! window), [`slug`] and [`forms`] (input validation).
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns
//! `Result<T, ShowcaseError>`, and never writes to stdout or stderr. The same
//! core could back a web frontend.
//!
//! ## Testing Strategy
//!
//! - **Commands** are tested against `InMemoryStore`, usually seeded through
//!   `StoreFixture` (available to other crates with the `test_utils` feature).
//! - **FileStore** has integration tests over a temporary directory.
//! - **CLI** tests parse real argument lists and check the rendered text;
//!   end-to-end runs of the binary live in `tests/cli.rs`.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod paginate;
pub mod search;
pub mod slug;
pub mod store;
