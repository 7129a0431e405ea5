use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::config::IMAGE_SEPARATOR;

// ---------------------------------------------------------------------------
// Column names of the scraper export
// ---------------------------------------------------------------------------

pub mod columns {
    pub const LOCALITY: &str = "Lokalita";
    pub const YIELD: &str = "Výnos %";
    pub const PRICE: &str = "Cena";
    pub const IMAGES: &str = "Obrazek";
    pub const SOURCE: &str = "Zdroj";
    pub const TITLE: &str = "Název";
    pub const AREA: &str = "m2";
    pub const URL: &str = "URL";
    pub const IS_SHARE: &str = "JePodil";
    pub const IS_AUCTION: &str = "JeDrazba";
    pub const LAT: &str = "Lat";
    pub const LON: &str = "Lon";
    pub const DESCRIPTION: &str = "Popis";

    /// Columns every export must carry.
    pub const REQUIRED: [&str; 8] = [LOCALITY, YIELD, PRICE, IMAGES, SOURCE, TITLE, AREA, URL];
}

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as produced by any of the file readers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    #[serde(skip)]
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a number. Numeric text is accepted too, since
    /// CSV and some spreadsheet exports store numbers as strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Integer(i) => Some(*i != 0),
            CellValue::Float(v) => Some(*v != 0.0),
            CellValue::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "ano" | "yes" => Some(true),
                "false" | "0" | "ne" | "no" | "" => Some(false),
                _ => None,
            },
            CellValue::Null => None,
        }
    }

    /// Text content; `None` for null and blank cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

/// One raw row: column name → cell.
pub type Record = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Listing – one row of the export
// ---------------------------------------------------------------------------

/// A single scraped listing. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub title: String,
    pub locality: String,
    pub price: f64,
    /// Floor area in square meters.
    pub area: f64,
    /// Gross annual rental yield, percent.
    pub yield_percent: f64,
    pub description: String,
    /// Raw `Obrazek` cell, `None` when the cell is empty.
    pub image_field: Option<String>,
    pub source_site: String,
    pub is_share: bool,
    pub is_auction: bool,
    /// `0.0` when unknown.
    pub latitude: f64,
    /// `0.0` when unknown.
    pub longitude: f64,
    pub url: String,
}

impl Listing {
    /// Build a listing from a raw record, defaulting the optional columns.
    ///
    /// Returns `None` when the row has no usable price or yield.
    pub fn from_record(record: &Record) -> Option<Self> {
        let text = |col: &str| {
            record
                .get(col)
                .and_then(CellValue::as_text)
                .unwrap_or_default()
        };
        let number = |col: &str| record.get(col).and_then(CellValue::as_f64);
        let flag = |col: &str| {
            record
                .get(col)
                .and_then(CellValue::as_bool)
                .unwrap_or(false)
        };

        let price = number(columns::PRICE)?;
        let yield_percent = number(columns::YIELD)?;

        Some(Listing {
            title: text(columns::TITLE),
            locality: text(columns::LOCALITY),
            price,
            area: number(columns::AREA).unwrap_or(0.0),
            yield_percent,
            description: text(columns::DESCRIPTION),
            image_field: record.get(columns::IMAGES).and_then(CellValue::as_text),
            source_site: text(columns::SOURCE),
            is_share: flag(columns::IS_SHARE),
            is_auction: flag(columns::IS_AUCTION),
            latitude: number(columns::LAT).unwrap_or(0.0),
            longitude: number(columns::LON).unwrap_or(0.0),
            url: text(columns::URL),
        })
    }

    /// Whether the export carried anything in the image column.
    pub fn has_photo(&self) -> bool {
        self.image_field.is_some()
    }

    /// Valid image URLs, primary first.
    pub fn image_urls(&self) -> Vec<&str> {
        self.image_field
            .as_deref()
            .map(|raw| {
                raw.split(IMAGE_SEPARATOR)
                    .map(str::trim)
                    .filter(|tok| tok.starts_with("http"))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `(0, 0)` means "no GPS data". A real listing at that spot would be
    /// in the Gulf of Guinea, so the collision is accepted.
    pub fn has_location(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded export
// ---------------------------------------------------------------------------

/// The full parsed export with the pre-computed locality index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub listings: Vec<Listing>,
    /// Sorted distinct non-empty localities.
    pub localities: BTreeSet<String>,
    /// Rows dropped because price or yield was not numeric.
    pub skipped_rows: usize,
}

impl Dataset {
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let localities = listings
            .iter()
            .filter(|l| !l.locality.is_empty())
            .map(|l| l.locality.clone())
            .collect();
        Dataset {
            listings,
            localities,
            skipped_rows: 0,
        }
    }

    /// Map raw records into listings after checking the required columns.
    ///
    /// `header` is the set of column names present in the file; optional
    /// columns missing from it are defaulted per row.
    pub fn from_records<'a>(
        header: impl IntoIterator<Item = &'a str>,
        records: &[Record],
    ) -> Result<Self> {
        let header: BTreeSet<&str> = header.into_iter().collect();
        let missing: Vec<&str> = columns::REQUIRED
            .iter()
            .copied()
            .filter(|col| !header.contains(col))
            .collect();
        if !missing.is_empty() {
            bail!("missing required column(s): {}", missing.join(", "));
        }

        let listings: Vec<Listing> = records.iter().filter_map(Listing::from_record).collect();
        let skipped = records.len() - listings.len();
        if skipped > 0 {
            log::warn!("Skipped {skipped} row(s) without a numeric price or yield");
        }

        let mut dataset = Dataset::from_listings(listings);
        dataset.skipped_rows = skipped;
        if dataset.is_empty() {
            log::warn!("Export contains no usable listings");
        }
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
