//! Application-wide constants and defaults.

use std::ops::RangeInclusive;
use std::time::Duration;

/// File-name prefix of the exports written by the scraper bot.
pub const DEFAULT_FILE_PREFIX: &str = "INVESTICNI_HITPARADA";

/// Extension of the exports written by the scraper bot.
pub const DEFAULT_FILE_EXTENSION: &str = "xlsx";

/// How long a loaded dataset is served before the source is re-read.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Separator between image URLs inside the `Obrazek` column.
pub const IMAGE_SEPARATOR: &str = ";;;";

/// Timestamp format of the "data from" caption (`14:05 03.11.`).
pub const DATA_STAMP_FORMAT: &str = "%H:%M %d.%m.";

/// Message shown when no export could be found.
pub const NO_DATA_HINT: &str = "No data! Run the scraper bot first.";

/// Maximum number of listings drawn on the map.
pub const MAP_POINT_LIMIT: usize = 500;

// ---------------------------------------------------------------------------
// Side panel widget ranges
// ---------------------------------------------------------------------------

pub const CARD_COUNT_RANGE: RangeInclusive<usize> = 10..=200;
pub const DEFAULT_CARD_COUNT: usize = 30;

pub const MIN_YIELD_RANGE: RangeInclusive<f64> = 0.0..=15.0;
pub const DEFAULT_MIN_YIELD: f64 = 4.0;

/// Price ceiling slider range, in millions.
pub const MAX_PRICE_RANGE_M: RangeInclusive<f64> = 0.5..=15.0;
pub const DEFAULT_MAX_PRICE: f64 = 8_000_000.0;

pub const SLIDER_STEP: f64 = 0.5;

// ---------------------------------------------------------------------------
// Calculator defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_OWN_EQUITY: f64 = 1_000_000.0;
pub const DEFAULT_INTEREST_RATE_PERCENT: f64 = 5.1;
pub const DEFAULT_TERM_YEARS: u32 = 30;
pub const DEFAULT_RESERVE_FUND: f64 = 3_500.0;
