use std::collections::BTreeSet;

use super::model::{Dataset, Listing};
use crate::config::{DEFAULT_MAX_PRICE, DEFAULT_MIN_YIELD};

// ---------------------------------------------------------------------------
// Filter criteria chosen in the side panel
// ---------------------------------------------------------------------------

/// How auction listings are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionFilter {
    ExcludeAuctions,
    OnlyAuctions,
    All,
}

impl AuctionFilter {
    pub const ALL: [AuctionFilter; 3] = [
        AuctionFilter::ExcludeAuctions,
        AuctionFilter::OnlyAuctions,
        AuctionFilter::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AuctionFilter::ExcludeAuctions => "No auctions",
            AuctionFilter::OnlyAuctions => "Auctions only",
            AuctionFilter::All => "All",
        }
    }

    fn accepts(self, listing: &Listing) -> bool {
        match self {
            AuctionFilter::ExcludeAuctions => !listing.is_auction,
            AuctionFilter::OnlyAuctions => listing.is_auction,
            AuctionFilter::All => true,
        }
    }
}

/// Conjunctive predicates over listings. An empty `cities` set means
/// "any city".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub min_yield: f64,
    pub max_price: f64,
    pub cities: BTreeSet<String>,
    pub hide_shares: bool,
    pub require_photo: bool,
    pub auction: AuctionFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_yield: DEFAULT_MIN_YIELD,
            max_price: DEFAULT_MAX_PRICE,
            cities: BTreeSet::new(),
            hide_shares: true,
            require_photo: true,
            auction: AuctionFilter::ExcludeAuctions,
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.yield_percent >= self.min_yield
            && listing.price <= self.max_price
            && (!self.hide_shares || !listing.is_share)
            && (!self.require_photo || listing.has_photo())
            && (self.cities.is_empty() || self.cities.contains(&listing.locality))
            && self.auction.accepts(listing)
    }
}

/// Indices of listings passing `criteria`, highest yield first.
///
/// The sort is stable, so equal yields keep their file order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    let listings = &dataset.listings;
    let mut indices: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, l)| criteria.matches(l))
        .map(|(i, _)| i)
        .collect();
    indices.sort_by(|&a, &b| {
        listings[b]
            .yield_percent
            .total_cmp(&listings[a].yield_percent)
    });
    indices
}

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// `None` when nothing matched.
    pub mean_yield: Option<f64>,
    pub mean_price: Option<f64>,
}

pub fn summarize(dataset: &Dataset, indices: &[usize]) -> Summary {
    let count = indices.len();
    if count == 0 {
        return Summary {
            count,
            mean_yield: None,
            mean_price: None,
        };
    }
    let (yield_sum, price_sum) = indices
        .iter()
        .map(|&i| &dataset.listings[i])
        .fold((0.0, 0.0), |(y, p), l| (y + l.yield_percent, p + l.price));
    Summary {
        count,
        mean_yield: Some(yield_sum / count as f64),
        mean_price: Some(price_sum / count as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::listing;

    impl FilterCriteria {
        /// Criteria that let every listing through.
        fn permissive() -> Self {
            Self {
                min_yield: f64::NEG_INFINITY,
                max_price: f64::INFINITY,
                cities: BTreeSet::new(),
                hide_shares: false,
                require_photo: false,
                auction: AuctionFilter::All,
            }
        }
    }

    fn dataset() -> Dataset {
        let mut share = listing("share", 1_500_000.0, 9.0);
        share.is_share = true;
        let mut auction = listing("auction", 900_000.0, 11.0);
        auction.is_auction = true;
        let mut no_photo = listing("no_photo", 2_000_000.0, 6.0);
        no_photo.image_field = None;
        let mut praha = listing("praha", 7_900_000.0, 4.0);
        praha.locality = "Praha".into();
        Dataset::from_listings(vec![
            listing("cheap", 1_000_000.0, 6.0),
            share,
            auction,
            no_photo,
            praha,
            listing("pricey", 9_000_000.0, 7.0),
            listing("low", 1_200_000.0, 3.5),
        ])
    }

    fn titles(ds: &Dataset, idx: &[usize]) -> Vec<String> {
        idx.iter().map(|&i| ds.listings[i].title.clone()).collect()
    }

    #[test]
    fn default_criteria() {
        let ds = dataset();
        let idx = filtered_indices(&ds, &FilterCriteria::default());
        assert_eq!(titles(&ds, &idx), vec!["cheap", "praha"]);
    }

    #[test]
    fn auction_modes() {
        let ds = dataset();
        let mut c = FilterCriteria::permissive();
        c.auction = AuctionFilter::OnlyAuctions;
        assert_eq!(titles(&ds, &filtered_indices(&ds, &c)), vec!["auction"]);

        c.auction = AuctionFilter::ExcludeAuctions;
        assert!(!titles(&ds, &filtered_indices(&ds, &c)).contains(&"auction".to_string()));
    }

    #[test]
    fn city_selection() {
        let ds = dataset();
        let mut c = FilterCriteria::permissive();
        c.cities.insert("Praha".into());
        assert_eq!(titles(&ds, &filtered_indices(&ds, &c)), vec!["praha"]);
    }

    #[test]
    fn yield_and_price_filters_commute() {
        let ds = dataset();
        let yield_only = FilterCriteria {
            min_yield: 5.0,
            ..FilterCriteria::permissive()
        };
        let price_only = FilterCriteria {
            max_price: 2_000_000.0,
            ..FilterCriteria::permissive()
        };

        let a: BTreeSet<usize> = filtered_indices(&ds, &yield_only)
            .into_iter()
            .filter(|&i| price_only.matches(&ds.listings[i]))
            .collect();
        let b: BTreeSet<usize> = filtered_indices(&ds, &price_only)
            .into_iter()
            .filter(|&i| yield_only.matches(&ds.listings[i]))
            .collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn sort_is_stable_and_non_increasing() {
        let ds = dataset();
        let idx = filtered_indices(&ds, &FilterCriteria::permissive());
        assert_eq!(idx.len(), ds.len());
        for pair in idx.windows(2) {
            assert!(ds.listings[pair[0]].yield_percent >= ds.listings[pair[1]].yield_percent);
        }
        // "cheap" (6.0) precedes "no_photo" (6.0) as in the file.
        let pos = |t: &str| idx.iter().position(|&i| ds.listings[i].title == t).unwrap();
        assert!(pos("cheap") < pos("no_photo"));
    }

    #[test]
    fn source_is_not_mutated() {
        let ds = dataset();
        let before = ds.listings.clone();
        let _ = filtered_indices(&ds, &FilterCriteria::default());
        assert_eq!(ds.listings, before);
    }

    #[test]
    fn summary_means() {
        let ds = dataset();
        let c = FilterCriteria::default();
        let idx = filtered_indices(&ds, &c);
        let s = summarize(&ds, &idx);
        assert_eq!(s.count, 2);
        assert_eq!(s.mean_yield, Some(5.0));
        assert_eq!(s.mean_price, Some(4_450_000.0));

        assert_eq!(summarize(&ds, &[]).mean_yield, None);
    }
}
