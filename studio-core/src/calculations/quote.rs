//! Instant quote calculation.
//!
//! A quote is a cost range around a point estimate:
//!
//! | Category    | Point estimate |
//! |-------------|----------------|
//! | Residential | area × rate + bedrooms × ₹50,000 + ₹5,00,000 if a home theatre is included |
//! | Commercial  | area per floor × floors × rate |
//!
//! The range is `floor(total × 0.9)` to `ceil(total × 1.1)`.
//!
//! # Example
//!
//! ```
//! use studio_core::calculations::QuoteEstimator;
//! use studio_core::{ProjectEstimateRequest, Tier};
//!
//! let request = ProjectEstimateRequest::residential(Tier::Standard, 1500, 2, false);
//! let result = QuoteEstimator::default().estimate(&request);
//!
//! assert_eq!(result.min_cost, 2_925_000);
//! assert_eq!(result.max_cost, 3_575_000);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{ceil_to_whole, floor_to_whole};
use crate::models::{
    ProjectCategory, ProjectEstimateRequest, ProjectEstimateResult, ProjectLayout, Tier,
};

const BEDROOM_COST: Decimal = dec!(50000);
const HOME_THEATRE_COST: Decimal = dec!(500000);
const MIN_FACTOR: Decimal = dec!(0.9);
const MAX_FACTOR: Decimal = dec!(1.1);

/// Base rate per square foot for each tier of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRates {
    pub basic: u32,
    pub standard: u32,
    pub luxury: u32,
}

impl TierRates {
    pub fn rate(
        &self,
        tier: Tier,
    ) -> u32 {
        match tier {
            Tier::Basic => self.basic,
            Tier::Standard => self.standard,
            Tier::Luxury => self.luxury,
        }
    }
}

/// Base rates keyed by category and tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingTable {
    pub residential: TierRates,
    pub commercial: TierRates,
}

impl PricingTable {
    pub fn rate(
        &self,
        category: ProjectCategory,
        tier: Tier,
    ) -> u32 {
        match category {
            ProjectCategory::Residential => self.residential.rate(tier),
            ProjectCategory::Commercial => self.commercial.rate(tier),
        }
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            residential: TierRates {
                basic: 1400,
                standard: 2100,
                luxury: 2800,
            },
            commercial: TierRates {
                basic: 1600,
                standard: 2400,
                luxury: 3100,
            },
        }
    }
}

/// Calculator for project quotes.
///
/// Pure and stateless apart from its pricing table; a shared instance can be
/// used from any number of tasks. The estimator does not validate its input.
/// Requests are expected to have gone through
/// [`crate::validation::estimate::sanitize`] first.
#[derive(Debug, Clone, Default)]
pub struct QuoteEstimator {
    pricing: PricingTable,
}

impl QuoteEstimator {
    pub fn new(pricing: PricingTable) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Calculates the quote range for a request. Never fails.
    pub fn estimate(
        &self,
        request: &ProjectEstimateRequest,
    ) -> ProjectEstimateResult {
        let total = self.total_cost(request);

        ProjectEstimateResult {
            min_cost: self.min_cost(total),
            max_cost: self.max_cost(total),
        }
    }

    /// Point estimate before the ±10% spread is applied.
    pub fn total_cost(
        &self,
        request: &ProjectEstimateRequest,
    ) -> Decimal {
        let rate = Decimal::from(self.pricing.rate(request.category(), request.tier));
        let area = Decimal::from(request.floor_area_sq_ft);

        match request.layout {
            ProjectLayout::Residential {
                bedroom_count,
                has_home_theatre,
            } => {
                let theatre = if has_home_theatre {
                    HOME_THEATRE_COST
                } else {
                    Decimal::ZERO
                };
                area * rate + Decimal::from(bedroom_count) * BEDROOM_COST + theatre
            }
            ProjectLayout::Commercial { floor_count } => {
                area * Decimal::from(floor_count) * rate
            }
        }
    }

    fn min_cost(
        &self,
        total: Decimal,
    ) -> u64 {
        floor_to_whole(total * MIN_FACTOR)
    }

    fn max_cost(
        &self,
        total: Decimal,
    ) -> u64 {
        ceil_to_whole(total * MAX_FACTOR)
    }
}

/// Estimates with the studio's default pricing table.
pub fn estimate(request: &ProjectEstimateRequest) -> ProjectEstimateResult {
    QuoteEstimator::default().estimate(request)
}
