//! roster-bench
//!
//! Generates large synthetic employee rosters as NDJSON and serves a paged,
//! metrics-instrumented read/search API over the same data in PostgreSQL.
//!
//! The interesting parts live in the member crates:
//!
//! - `roster-core` — the employee record, vocabularies, and synthesizer
//! - `roster-generator` — the backpressure-safe streaming NDJSON emitter
//! - `roster-server` — the instrumented pagination and dual-path search API
//!
//! This crate is the CLI shell tying them together.

pub mod generate;
pub mod serve;
