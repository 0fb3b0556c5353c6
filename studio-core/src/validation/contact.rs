use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ContactPayload, InquiryForm, NewContactInquiry, ProjectType};
use crate::validation::{ValidationErrors, non_blank};

/// `local@domain.tld`, no whitespace anywhere.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Validates a contact submission for the given form.
///
/// All mandatory fields are checked (nothing short-circuits) so the caller
/// gets every problem at once. Optional fields are trimmed and blank ones
/// dropped. Project type is mandatory only for [`InquiryForm::Project`];
/// on the quick form an unrecognised value is ignored.
pub fn validate_contact(
    form: InquiryForm,
    payload: &ContactPayload,
) -> Result<NewContactInquiry, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = non_blank(payload.name.as_deref());
    if name.is_none() {
        errors.push("name", "Name is required");
    }

    let email = non_blank(payload.email.as_deref());
    match &email {
        None => errors.push("email", "Email is required"),
        Some(email) if !is_valid_email(email) => errors.push("email", "Email is invalid"),
        Some(_) => {}
    }

    let raw_project_type = non_blank(payload.project_type.as_deref());
    let project_type = raw_project_type.as_deref().and_then(ProjectType::parse);
    if form.requires_project_type() {
        match (&raw_project_type, project_type) {
            (None, _) => errors.push("projectType", "Project type is required"),
            (Some(_), None) => errors.push("projectType", "Project type is invalid"),
            (Some(_), Some(_)) => {}
        }
    }

    let message = non_blank(payload.message.as_deref());
    if message.is_none() {
        errors.push("message", "Message is required");
    }

    let (Some(name), Some(email), Some(message)) = (name, email, message) else {
        return Err(errors);
    };

    errors.into_result(NewContactInquiry {
        form,
        name,
        email,
        message,
        phone: non_blank(payload.phone.as_deref()),
        project_type,
        budget: non_blank(payload.budget.as_deref()),
        timeline: non_blank(payload.timeline.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn complete_payload() -> ContactPayload {
        ContactPayload {
            name: Some("Asha Rao".to_string()),
            email: Some("asha@example.in".to_string()),
            message: Some("Planning a 3BHK renovation.".to_string()),
            phone: Some(" 98450 12345 ".to_string()),
            project_type: Some("interior".to_string()),
            budget: Some("₹15L - ₹30L".to_string()),
            timeline: Some("".to_string()),
        }
    }

    // =========================================================================
    // email shape
    // =========================================================================

    #[test]
    fn email_shape_accepts_basic_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@studio.example.in"));
    }

    #[test]
    fn email_shape_rejects_malformed_addresses() {
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("missing-tld@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("user@.com"));
    }

    // =========================================================================
    // quick form
    // =========================================================================

    #[test]
    fn quick_form_accepts_minimal_payload() {
        let payload = ContactPayload {
            name: Some("Ravi".to_string()),
            email: Some("ravi@example.com".to_string()),
            message: Some("Hello".to_string()),
            ..Default::default()
        };

        let inquiry = validate_contact(InquiryForm::Quick, &payload).unwrap();

        assert_eq!(
            inquiry,
            NewContactInquiry {
                form: InquiryForm::Quick,
                name: "Ravi".to_string(),
                email: "ravi@example.com".to_string(),
                message: "Hello".to_string(),
                phone: None,
                project_type: None,
                budget: None,
                timeline: None,
            }
        );
    }

    #[test]
    fn missing_email_is_reported_by_field() {
        let payload = ContactPayload {
            email: None,
            ..complete_payload()
        };

        let errors = validate_contact(InquiryForm::Quick, &payload).unwrap_err();

        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.fields().len(), 1);
    }

    #[test]
    fn malformed_email_is_invalid_not_missing() {
        let payload = ContactPayload {
            email: Some("asha-at-example".to_string()),
            ..complete_payload()
        };

        let errors = validate_contact(InquiryForm::Quick, &payload).unwrap_err();

        assert_eq!(errors.get("email"), Some("Email is invalid"));
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let payload = ContactPayload {
            name: Some("   ".to_string()),
            email: Some(" ".to_string()),
            message: Some("\n\t".to_string()),
            ..Default::default()
        };

        let errors = validate_contact(InquiryForm::Quick, &payload).unwrap_err();

        let fields: Vec<_> = errors.fields().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "message"]);
    }

    #[test]
    fn quick_form_ignores_unknown_project_type() {
        let payload = ContactPayload {
            project_type: Some("castle".to_string()),
            ..complete_payload()
        };

        let inquiry = validate_contact(InquiryForm::Quick, &payload).unwrap();

        assert_eq!(inquiry.project_type, None);
    }

    #[test]
    fn optional_fields_are_trimmed_and_blank_dropped() {
        let inquiry = validate_contact(InquiryForm::Quick, &complete_payload()).unwrap();

        assert_eq!(inquiry.phone.as_deref(), Some("98450 12345"));
        assert_eq!(inquiry.budget.as_deref(), Some("₹15L - ₹30L"));
        assert_eq!(inquiry.timeline, None);
        assert_eq!(inquiry.project_type, Some(ProjectType::Interior));
    }

    // =========================================================================
    // project form
    // =========================================================================

    #[test]
    fn project_form_requires_project_type() {
        let payload = ContactPayload {
            project_type: None,
            ..complete_payload()
        };

        let errors = validate_contact(InquiryForm::Project, &payload).unwrap_err();

        assert_eq!(errors.get("projectType"), Some("Project type is required"));
    }

    #[test]
    fn project_form_rejects_unknown_project_type() {
        let payload = ContactPayload {
            project_type: Some("castle".to_string()),
            ..complete_payload()
        };

        let errors = validate_contact(InquiryForm::Project, &payload).unwrap_err();

        assert_eq!(errors.get("projectType"), Some("Project type is invalid"));
    }

    #[test]
    fn project_form_reports_fields_in_form_order() {
        let errors = validate_contact(InquiryForm::Project, &ContactPayload::default()).unwrap_err();

        let fields: Vec<_> = errors.fields().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "projectType", "message"]);
    }

    #[test]
    fn project_form_accepts_complete_payload() {
        let inquiry = validate_contact(InquiryForm::Project, &complete_payload()).unwrap();

        assert_eq!(inquiry.form, InquiryForm::Project);
        assert_eq!(inquiry.project_type, Some(ProjectType::Interior));
        assert_eq!(inquiry.name, "Asha Rao");
    }
}
