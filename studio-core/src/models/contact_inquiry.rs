use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Residential,
    Commercial,
    Interior,
    Landscape,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Interior => "interior",
            Self::Landscape => "landscape",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            "interior" => Some(Self::Interior),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

/// Which contact form an inquiry came from.
///
/// The quick form only asks for name, email and message. The project form
/// additionally requires a project type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryForm {
    #[default]
    Quick,
    Project,
}

impl InquiryForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Project => "project",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "quick" => Some(Self::Quick),
            "project" => Some(Self::Project),
            _ => None,
        }
    }

    pub fn requires_project_type(&self) -> bool {
        matches!(self, Self::Project)
    }
}

/// Raw submission as received from the site. Every field is optional here so
/// that a missing field becomes a field-level validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

/// A stored inquiry. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub id: i64,
    pub form: InquiryForm,
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub project_type: Option<ProjectType>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// A validated inquiry that has not been stored yet (no id or timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactInquiry {
    pub form: InquiryForm,
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub project_type: Option<ProjectType>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}
