//! Adaptive price range buckets.
//!
//! Buckets are regenerated from scratch whenever the active subset's price
//! distribution changes. A three-tier template policy keyed by the observed
//! price range keeps bucket counts stable regardless of the absolute price
//! scale: cheap catalogs get finer granularity, expensive ones coarser. The
//! exact boundaries are policy, not contract.

use rust_decimal::Decimal;

use clementine_core::Product;

/// Range magnitude below which the narrow (width-25) template applies.
const NARROW_RANGE_LIMIT: u32 = 100;
/// Range magnitude below which the mid template applies.
const MID_RANGE_LIMIT: u32 = 500;

/// Bucket boundaries per tier. Consecutive pairs form half-open buckets
/// `[low, high)`; the final boundary starts the open-ended tail.
const NARROW_BOUNDS: &[u32] = &[0, 25, 50, 75, 100];
const MID_BOUNDS: &[u32] = &[0, 50, 100, 500];
const WIDE_BOUNDS: &[u32] = &[0, 100, 500, 1000];

/// A contiguous price sub-range offered as a single filter option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBucket {
    /// Stable identity within one generation, e.g. `"100-500"` or `"1000+"`.
    pub id: String,
    /// Display label with the upper bound capped at the observed maximum.
    pub label: String,
    /// Inclusive lower bound.
    pub low: Decimal,
    /// Exclusive upper bound; `None` marks the open-ended tail bucket.
    pub high: Option<Decimal>,
    /// The shopper's current selection. Starts unselected.
    pub selected: bool,
}

impl PriceBucket {
    /// Whether a price falls inside this bucket.
    ///
    /// The tail bucket matches open-endedly regardless of its capped label.
    #[must_use]
    pub fn matches(&self, amount: Decimal) -> bool {
        amount >= self.low && self.high.is_none_or(|high| amount < high)
    }
}

/// Generate price buckets from the active subset's price distribution.
///
/// Only strictly positive prices of active products are considered; if none
/// exist the result is empty and no price facet is offered. Template buckets
/// containing zero products are omitted, so the shopper never sees an empty
/// option. When the result is non-empty it covers both the cheapest and the
/// most expensive product.
#[must_use]
pub fn generate_price_buckets(products: &[Product]) -> Vec<PriceBucket> {
    let eligible: Vec<&Product> = products
        .iter()
        .filter(|p| p.is_active() && p.price.amount > Decimal::ZERO)
        .collect();

    let amounts: Vec<Decimal> = eligible.iter().map(|p| p.price.amount).collect();
    let (Some(min), Some(max)) = (amounts.iter().min().copied(), amounts.iter().max().copied())
    else {
        return Vec::new();
    };

    let range = max - min;
    let bounds = template_bounds(range);
    let symbol = eligible
        .first()
        .map_or("$", |p| p.price.currency_code.symbol());

    let mut buckets = Vec::with_capacity(bounds.len());
    for pair in bounds.windows(2) {
        if let &[low, high] = pair {
            buckets.push(closed_bucket(
                symbol,
                Decimal::from(low),
                Decimal::from(high),
                max,
            ));
        }
    }
    if let Some(tail_low) = bounds.last().copied() {
        buckets.push(tail_bucket(symbol, Decimal::from(tail_low), max));
    }

    buckets
        .into_iter()
        .filter(|bucket| amounts.iter().any(|amount| bucket.matches(*amount)))
        .collect()
}

/// Select the boundary template for an observed price range.
fn template_bounds(range: Decimal) -> &'static [u32] {
    if range <= Decimal::from(NARROW_RANGE_LIMIT) {
        NARROW_BOUNDS
    } else if range <= Decimal::from(MID_RANGE_LIMIT) {
        MID_BOUNDS
    } else {
        WIDE_BOUNDS
    }
}

fn closed_bucket(symbol: &str, low: Decimal, high: Decimal, max: Decimal) -> PriceBucket {
    let cap = high.min(max);
    PriceBucket {
        id: format!("{low}-{high}"),
        label: bucket_label(symbol, low, cap),
        low,
        high: Some(high),
        selected: false,
    }
}

fn tail_bucket(symbol: &str, low: Decimal, max: Decimal) -> PriceBucket {
    PriceBucket {
        id: format!("{low}+"),
        label: bucket_label(symbol, low, max),
        low,
        high: None,
        selected: false,
    }
}

fn bucket_label(symbol: &str, low: Decimal, cap: Decimal) -> String {
    if low.is_zero() {
        format!("Under {symbol}{cap}")
    } else if cap > low {
        format!("{symbol}{low} - {symbol}{cap}")
    } else {
        format!("{symbol}{low}")
    }
}
