//! Pricing calculations for the instant quote widget.

pub mod common;
pub mod quote;

pub use quote::{PricingTable, QuoteEstimator, TierRates, estimate};
