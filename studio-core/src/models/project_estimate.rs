use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Residential,
    Commercial,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }
}

/// Quality level of the finished project; selects the base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Standard,
    Luxury,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Luxury => "luxury",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "standard" => Some(Self::Standard),
            "luxury" => Some(Self::Luxury),
            _ => None,
        }
    }
}

/// Category-specific inputs. Only the fields of the active category exist,
/// so fields that do not apply can never be validated by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ProjectLayout {
    Residential {
        bedroom_count: u8,
        has_home_theatre: bool,
    },
    Commercial {
        floor_count: u16,
    },
}

impl ProjectLayout {
    pub fn category(&self) -> ProjectCategory {
        match self {
            Self::Residential { .. } => ProjectCategory::Residential,
            Self::Commercial { .. } => ProjectCategory::Commercial,
        }
    }
}

/// A sanitized request for a quote.
///
/// `floor_area_sq_ft` is the total livable area for residential projects and
/// the area of a single floor for commercial ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEstimateRequest {
    pub tier: Tier,
    pub floor_area_sq_ft: u32,
    pub layout: ProjectLayout,
}

impl ProjectEstimateRequest {
    pub fn residential(
        tier: Tier,
        floor_area_sq_ft: u32,
        bedroom_count: u8,
        has_home_theatre: bool,
    ) -> Self {
        Self {
            tier,
            floor_area_sq_ft,
            layout: ProjectLayout::Residential {
                bedroom_count,
                has_home_theatre,
            },
        }
    }

    pub fn commercial(
        tier: Tier,
        floor_area_sq_ft: u32,
        floor_count: u16,
    ) -> Self {
        Self {
            tier,
            floor_area_sq_ft,
            layout: ProjectLayout::Commercial { floor_count },
        }
    }

    pub fn category(&self) -> ProjectCategory {
        self.layout.category()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEstimateResult {
    pub min_cost: u64,
    pub max_cost: u64,
}

/// Flat wire shape of an estimate request, as the estimator widget posts it.
///
/// Converted into a [`ProjectEstimateRequest`] by
/// [`crate::validation::estimate::sanitize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatePayload {
    pub category: Option<String>,
    pub tier: Option<String>,
    pub floor_area_sq_ft: Option<u32>,
    pub bedroom_count: Option<u32>,
    pub has_home_theatre: Option<bool>,
    pub floor_count: Option<u32>,
}

impl EstimatePayload {
    /// Shorthand for [`crate::validation::estimate::sanitize`].
    pub fn into_request(self) -> Result<ProjectEstimateRequest, crate::validation::ValidationErrors> {
        crate::validation::estimate::sanitize(&self)
    }
}
