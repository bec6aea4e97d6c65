//! # Sleepdiary Core Library
//!
//! This library provides the core logic for the Sleepdiary sleep tracker.
//! Every operation is available through the standalone CLI binary, which is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Metrics**: Pure efficiency engine. Parses clock times, computes the
//!   planned sleep window across midnight, derives efficiency percentages and
//!   rounds them with a configurable policy
//! - **Diary**: Immutable data model for raw answers and assembled records
//! - **Collector**: Prompt-driven entry collection over an injectable line source
//! - **Storage**: SQLite-based entry storage and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`RecordAssembler`]: Turns a [`RawEntry`] into a [`SleepRecord`]
//! - [`RoundingPolicy`]: How stored percentages are rounded
//! - [`DiaryCollector`]: Interactive questionnaire
//! - [`Database`]: Entry persistence
//! - [`Config`]: Application configuration management

pub mod collector;
pub mod diary;
pub mod error;
pub mod metrics;
pub mod storage;

pub use collector::{DiaryCollector, LineSource, ScriptedLines, StdinLines};
pub use diary::{ComputedMetrics, RawEntry, SleepRecord};
pub use error::{CollectError, ConfigError, CoreError, DatabaseError};
pub use metrics::{ClockParseError, ClockTime, RecordAssembler, RoundingPolicy};
pub use storage::{Config, Database};
