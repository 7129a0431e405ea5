//! Per-listing derivations: description tags and mortgage cashflow.

pub mod cashflow;
pub mod tags;
