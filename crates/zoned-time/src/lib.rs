//! # zoned-time
//!
//! DST-correct conversion between UTC instants and civil (wall-clock) time.
//!
//! Converting UTC to local time is a single offset lookup. Converting local
//! time back to UTC is not: around a spring-forward transition some civil
//! times never occur, and around an autumn fallback some occur twice. This
//! crate classifies every civil time as unambiguous, ambiguous or gapped,
//! resolves it deterministically, and locates the exact transition instants.
//!
//! All offset data comes from an injected [`OffsetProvider`]; the free
//! functions use [`TzdbProvider`], backed by the IANA database in `chrono-tz`.
//!
//! ## Modules
//!
//! - [`convert`] — UTC ⇄ civil time, gap and ambiguity resolution
//! - [`transitions`] — DST start/end search and "next transition" queries
//! - [`provider`] — The offset provider capability and its tzdb implementation
//! - [`registry`] — Supported timezones and display metadata
//! - [`dst`] — DST status at an instant
//! - [`format`] — Local and UTC string formatting
//! - [`working_hours`] — Working-hours and business-day predicates
//! - [`config`] — JSON-loaded caller defaults
//! - [`validate`] — Input validation
//! - [`types`] — Shared value types
//! - [`error`] — Error types

pub mod config;
pub mod convert;
pub mod dst;
pub mod error;
pub mod format;
pub mod provider;
pub mod registry;
pub mod transitions;
pub mod types;
pub mod validate;
pub mod working_hours;

pub use config::ZonedTimeConfig;
pub use convert::{
    civil_to_utc, from_london_civil, to_london_civil, utc_to_civil, CivilTimeConverter,
};
pub use dst::{is_bst, is_dst};
pub use error::{Result, ZonedTimeError};
pub use format::{format_offset, to_london_string, to_timezone_string, to_utc_string};
pub use provider::{OffsetProvider, TzdbProvider};
pub use registry::{
    is_supported_timezone, metadata_for, supported_timezones, TimezoneMetadata,
    DEFAULT_TIMEZONE,
};
pub use transitions::{
    clock_change_dates, next_clock_change, next_transition_after, transitions_for_year,
    TransitionSearchEngine,
};
pub use types::{
    CivilTime, DstTransitions, OffsetInfo, TransitionEvent, TransitionKind, MAX_YEAR, MIN_YEAR,
};
pub use working_hours::{
    in_working_hours, in_working_hours_london, is_working_day, WorkingDays, WorkingHours,
};
