//! Input coercion for the quote widget.
//!
//! The estimator itself trusts its input; this is where the widget's limits
//! are enforced (1 to 20 bedrooms, at least one floor). Fields that do not
//! apply to the chosen category are dropped without being looked at.

use crate::models::{EstimatePayload, ProjectCategory, ProjectEstimateRequest, Tier};
use crate::validation::ValidationErrors;

pub const MIN_BEDROOMS: u32 = 1;
pub const MAX_BEDROOMS: u32 = 20;
pub const MIN_FLOORS: u32 = 1;

pub fn sanitize(payload: &EstimatePayload) -> Result<ProjectEstimateRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let category = match payload.category.as_deref() {
        None => {
            errors.push("category", "Category is required");
            None
        }
        Some(raw) => {
            let parsed = ProjectCategory::parse(raw);
            if parsed.is_none() {
                errors.push("category", "Category must be residential or commercial");
            }
            parsed
        }
    };

    let tier = match payload.tier.as_deref() {
        None => {
            errors.push("tier", "Type is required");
            None
        }
        Some(raw) => {
            let parsed = Tier::parse(raw);
            if parsed.is_none() {
                errors.push("tier", "Type must be basic, standard or luxury");
            }
            parsed
        }
    };

    let area = payload.floor_area_sq_ft;
    if area.is_none() {
        errors.push("floorAreaSqFt", "Square feet is required");
    }

    let request = match (category, tier, area) {
        (Some(ProjectCategory::Residential), Some(tier), Some(area)) => {
            bedrooms(payload, &mut errors).map(|bedrooms| {
                ProjectEstimateRequest::residential(
                    tier,
                    area,
                    bedrooms,
                    payload.has_home_theatre.unwrap_or(false),
                )
            })
        }
        (Some(ProjectCategory::Commercial), Some(tier), Some(area)) => {
            floors(payload, &mut errors)
                .map(|floors| ProjectEstimateRequest::commercial(tier, area, floors))
        }
        (Some(ProjectCategory::Residential), _, _) => {
            bedrooms(payload, &mut errors);
            None
        }
        (Some(ProjectCategory::Commercial), _, _) => {
            floors(payload, &mut errors);
            None
        }
        (None, _, _) => None,
    };

    match request {
        Some(request) => errors.into_result(request),
        None => Err(errors),
    }
}

fn bedrooms(
    payload: &EstimatePayload,
    errors: &mut ValidationErrors,
) -> Option<u8> {
    match payload.bedroom_count {
        None => {
            errors.push("bedroomCount", "No. of bedrooms is required");
            None
        }
        Some(count) if !(MIN_BEDROOMS..=MAX_BEDROOMS).contains(&count) => {
            errors.push(
                "bedroomCount",
                format!("No. of bedrooms must be between {MIN_BEDROOMS} and {MAX_BEDROOMS}"),
            );
            None
        }
        Some(count) => u8::try_from(count).ok(),
    }
}

fn floors(
    payload: &EstimatePayload,
    errors: &mut ValidationErrors,
) -> Option<u16> {
    match payload.floor_count {
        None => {
            errors.push("floorCount", "No. of floors is required");
            None
        }
        Some(count) if count < MIN_FLOORS => {
            errors.push("floorCount", "No. of floors must be at least 1");
            None
        }
        Some(count) => match u16::try_from(count) {
            Ok(count) => Some(count),
            Err(_) => {
                errors.push(
                    "floorCount",
                    format!("No. of floors must be at most {}", u16::MAX),
                );
                None
            }
        },
    }
}
