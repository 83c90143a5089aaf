//! Lead-generation forms: detailed report requests and consultation bookings.
//!
//! Only minimal sanity checks happen here; anything stricter belongs to the
//! form layer in front of the service.

use crate::classification::ManagerType;
use crate::core::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Company size bucket collected on lead forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CompanySize {
    #[serde(rename = "1-9")]
    Micro,
    #[serde(rename = "10-49")]
    Small,
    #[serde(rename = "50-299")]
    Medium,
    #[serde(rename = "300-999")]
    Large,
    #[serde(rename = "1000+")]
    Enterprise,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl CompanySize {
    pub const ALL: [CompanySize; 6] = [
        CompanySize::Micro,
        CompanySize::Small,
        CompanySize::Medium,
        CompanySize::Large,
        CompanySize::Enterprise,
        CompanySize::Unknown,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CompanySize::Micro => "1-9",
            CompanySize::Small => "10-49",
            CompanySize::Medium => "50-299",
            CompanySize::Large => "300-999",
            CompanySize::Enterprise => "1000+",
            CompanySize::Unknown => "unknown",
        }
    }

    /// Phrase used in email copy.
    pub fn describe(&self) -> &'static str {
        match self {
            CompanySize::Micro => "a team of fewer than 10 people",
            CompanySize::Small => "a company of 10 to 49 people",
            CompanySize::Medium => "a company of 50 to 299 people",
            CompanySize::Large => "a company of 300 to 999 people",
            CompanySize::Enterprise => "an organization of 1,000 or more people",
            CompanySize::Unknown => "your organization",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CompanySize::ALL
            .into_iter()
            .find(|size| size.key() == s)
            .ok_or_else(|| {
                format!(
                    "unknown company size '{}' (expected one of: {})",
                    s,
                    CompanySize::ALL.map(|size| size.key()).join(", ")
                )
            })
    }
}

/// Contact details shared by both forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_size: CompanySize,
}

impl Contact {
    /// Reject obviously unusable contact details.
    pub fn check(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidLead("name is empty".into()));
        }
        let email = self.email.trim();
        let valid = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !valid || email.contains(char::is_whitespace) {
            return Err(Error::InvalidLead(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub result_id: String,
    #[serde(flatten)]
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationBooking {
    pub result_id: String,
    #[serde(flatten)]
    pub contact: Contact,
    /// Free-form preferred time slot, e.g. "Tue 14:00-15:00".
    pub preferred_slot: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadKind {
    ReportRequest,
    Consultation,
}

/// Persisted lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: String,
    pub kind: LeadKind,
    pub result_id: String,
    pub manager_type: ManagerType,
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LeadRecord {
    pub fn from_report_request(request: &ReportRequest, manager_type: ManagerType) -> Self {
        let created_at = Utc::now();
        Self {
            id: lead_id(
                LeadKind::ReportRequest,
                &request.result_id,
                &request.contact.email,
                created_at,
            ),
            kind: LeadKind::ReportRequest,
            result_id: request.result_id.clone(),
            manager_type,
            contact: request.contact.clone(),
            preferred_slot: None,
            message: None,
            created_at,
        }
    }

    pub fn from_booking(booking: &ConsultationBooking, manager_type: ManagerType) -> Self {
        let created_at = Utc::now();
        Self {
            id: lead_id(
                LeadKind::Consultation,
                &booking.result_id,
                &booking.contact.email,
                created_at,
            ),
            kind: LeadKind::Consultation,
            result_id: booking.result_id.clone(),
            manager_type,
            contact: booking.contact.clone(),
            preferred_slot: Some(booking.preferred_slot.clone()),
            message: booking.message.clone(),
            created_at,
        }
    }
}

fn lead_id(kind: LeadKind, result_id: &str, email: &str, at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{:?}", kind).as_bytes());
    hasher.update(result_id.as_bytes());
    hasher.update(email.trim().to_lowercase().as_bytes());
    hasher.update(at.to_rfc3339().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("lead-{}", &digest[..16])
}
