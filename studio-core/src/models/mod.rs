mod contact_inquiry;
mod phone_lead;
mod project_estimate;

pub use contact_inquiry::{ContactInquiry, ContactPayload, InquiryForm, NewContactInquiry, ProjectType};
pub use phone_lead::{NewPhoneLead, PhoneLead, PhoneLeadPayload};
pub use project_estimate::{
    EstimatePayload, ProjectCategory, ProjectEstimateRequest, ProjectEstimateResult, ProjectLayout,
    Tier,
};
