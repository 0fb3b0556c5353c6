//! Phone numbers captured by the "get in touch" popup.
//!
//! Any region libphonenumber knows is accepted. The number is parsed with
//! the chosen country as its default region, so both the national form
//! (`07400 123456`) and the international one (`+44 7400 123456`) work.

use phonenumber::metadata::DATABASE;
use phonenumber::Mode;
use phonenumber::country::Id as Region;

use crate::models::{NewPhoneLead, PhoneLeadPayload};
use crate::validation::ValidationErrors;

pub const DEFAULT_COUNTRY: &str = "IN";

/// Calling code for an ISO 3166-1 alpha-2 region, if libphonenumber has it.
pub fn calling_code(country: &str) -> Option<u16> {
    DATABASE
        .by_id(&country.to_string())
        .map(|meta| meta.country_code())
}

pub fn validate_phone_lead(payload: &PhoneLeadPayload) -> Result<NewPhoneLead, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let country = payload
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_COUNTRY)
        .to_ascii_uppercase();

    let (Ok(region), Some(code)) = (country.parse::<Region>(), calling_code(&country)) else {
        errors.push("country", "Unsupported country");
        return Err(errors);
    };

    let raw = payload.phone.as_deref().unwrap_or_default().trim();
    let parsed = phonenumber::parse(Some(region), raw)
        .ok()
        .filter(|number| number.code().value() == code && phonenumber::is_valid(number));

    let Some(number) = parsed else {
        errors.push(
            "phone",
            format!("Please enter a valid phone number for {country}"),
        );
        return Err(errors);
    };

    let e164 = number.format().mode(Mode::E164).to_string();
    let national_number = e164
        .strip_prefix(&format!("+{code}"))
        .unwrap_or(&e164)
        .to_string();

    errors.into_result(NewPhoneLead {
        country,
        national_number,
        e164,
    })
}
