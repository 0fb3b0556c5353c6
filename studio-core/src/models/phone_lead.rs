use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A phone number left in the "get in touch" popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneLead {
    pub id: i64,
    pub country: String,
    pub national_number: String,
    pub e164: String,
    pub captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhoneLead {
    pub country: String,
    pub national_number: String,
    pub e164: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneLeadPayload {
    pub country: Option<String>,
    pub phone: Option<String>,
}
