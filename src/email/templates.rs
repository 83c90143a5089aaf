use crate::classification::ManagerType;
use crate::leads::{CompanySize, ConsultationBooking};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

const REPORT_TEMPLATE: &str = include_str!("templates/report.html");
const CONSULTATION_TEMPLATE: &str = include_str!("templates/consultation.html");

/// Links embedded in outgoing mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLinks {
    /// Base URL of the result pages; the result id is appended.
    pub report_url_base: String,
    pub booking_url: String,
}

impl EmailLinks {
    pub fn report_url(&self, result_id: &str) -> String {
        format!("{}/{}", self.report_url_base.trim_end_matches('/'), result_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Report email sent after a respondent asks for the detailed report.
pub fn render_report_email(
    recipient: &str,
    manager_type: ManagerType,
    company_size: CompanySize,
    report_url: &str,
    booking_url: &str,
) -> RenderedEmail {
    let subject = format!(
        "Your management style report: {}",
        manager_type.display_name()
    );

    let html = fill_template(
        REPORT_TEMPLATE,
        &[
            ("SUBJECT", encode_text(&subject).into_owned()),
            ("NAME", encode_text(recipient).into_owned()),
            ("TYPE_NAME", encode_text(manager_type.display_name()).into_owned()),
            ("TAGLINE", encode_text(manager_type.tagline()).into_owned()),
            ("SUMMARY", encode_text(manager_type.summary()).into_owned()),
            ("COMPANY_SIZE", encode_text(company_size.describe()).into_owned()),
            ("REPORT_URL", encode_double_quoted_attribute(report_url).into_owned()),
            ("BOOKING_URL", encode_double_quoted_attribute(booking_url).into_owned()),
        ],
    );

    let text = format!(
        "Hi {recipient},\n\n\
         Thanks for taking the management style check. Your result:\n\n\
         {name} ({tagline})\n\n\
         {summary}\n\n\
         Your detailed report looks at these patterns in the context of {size}.\n\
         Read it here: {report_url}\n\n\
         Want to talk it through? Book a free consultation: {booking_url}\n",
        name = manager_type.display_name(),
        tagline = manager_type.tagline(),
        summary = manager_type.summary(),
        size = company_size.describe(),
    );

    RenderedEmail {
        subject,
        html,
        text,
    }
}

/// Confirmation sent after a consultation booking.
pub fn render_consultation_email(
    booking: &ConsultationBooking,
    manager_type: ManagerType,
    report_url: &str,
) -> RenderedEmail {
    let subject = "We received your consultation request".to_string();
    let name = booking.contact.name.as_str();

    let html = fill_template(
        CONSULTATION_TEMPLATE,
        &[
            ("SUBJECT", encode_text(&subject).into_owned()),
            ("NAME", encode_text(name).into_owned()),
            ("SLOT", encode_text(&booking.preferred_slot).into_owned()),
            ("TYPE_NAME", encode_text(manager_type.display_name()).into_owned()),
            (
                "COMPANY_SIZE",
                encode_text(booking.contact.company_size.describe()).into_owned(),
            ),
            ("REPORT_URL", encode_double_quoted_attribute(report_url).into_owned()),
        ],
    );

    let text = format!(
        "Hi {name},\n\n\
         We received your consultation request. A consultant will confirm the time by email.\n\n\
         Requested slot: {slot}\n\
         Your result: {type_name}\n\n\
         In the meantime you can revisit your result: {report_url}\n",
        slot = booking.preferred_slot,
        type_name = manager_type.display_name(),
    );

    RenderedEmail {
        subject,
        html,
        text,
    }
}

/// Replace `{{{KEY}}}` placeholders in one pass over the template.
/// Substituted values are never scanned again. Unknown keys stay as written.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let Some(end) = after.find("}}}") else {
            rest = &rest[start..];
            break;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 3 + end + 3]),
        }
        rest = &after[end + 3..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::Contact;

    #[test]
    fn test_report_email_fills_every_placeholder() {
        let email = render_report_email(
            "Aiko",
            ManagerType::SoloPlayer,
            CompanySize::Small,
            "https://example.com/results/r1",
            "https://example.com/book",
        );
        assert!(email.subject.contains("The One-Person Team"));
        assert!(!email.html.contains("{{{"));
        assert!(email.html.contains("https://example.com/results/r1"));
        assert!(email.text.contains("a company of 10 to 49 people"));
        assert!(email.text.contains("https://example.com/book"));
    }

    #[test]
    fn test_report_email_escapes_recipient() {
        let email = render_report_email(
            "<script>alert(1)</script>",
            ManagerType::Balanced,
            CompanySize::Unknown,
            "https://example.com/r",
            "https://example.com/b",
        );
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        // Plain text is not escaped.
        assert!(email.text.contains("<script>"));
    }

    #[test]
    fn test_consultation_email() {
        let booking = ConsultationBooking {
            result_id: "r1".into(),
            contact: Contact {
                name: "Ren & Co".into(),
                email: "ren@example.com".into(),
                company: None,
                company_size: CompanySize::Enterprise,
            },
            preferred_slot: "Thu 10:00".into(),
            message: None,
        };
        let email = render_consultation_email(&booking, ManagerType::Outdated, "https://x.test/r1");
        assert!(email.html.contains("Ren &amp; Co"));
        assert!(email.html.contains("Thu 10:00"));
        assert!(!email.html.contains("{{{"));
        assert!(email.text.contains("The Yesterday Manager"));
    }

    #[test]
    fn test_user_text_is_not_expanded_as_placeholder() {
        let email = render_report_email(
            "{{{REPORT_URL}}}",
            ManagerType::Balanced,
            CompanySize::Unknown,
            "https://example.com/results/r1",
            "https://example.com/book",
        );
        assert!(email.html.contains("Hi {{{REPORT_URL}}},"));

        let booking = ConsultationBooking {
            result_id: "r1".into(),
            contact: Contact {
                name: "Ren".into(),
                email: "ren@example.com".into(),
                company: None,
                company_size: CompanySize::Small,
            },
            preferred_slot: "{{{TYPE_NAME}}}".into(),
            message: None,
        };
        let email = render_consultation_email(&booking, ManagerType::Outdated, "https://x.test/r1");
        assert!(email.html.contains("<td>{{{TYPE_NAME}}}</td>"));
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed_markers() {
        let values = [("A", "1".to_string())];
        assert_eq!(fill_template("x{{{A}}}y{{{B}}}z", &values), "x1y{{{B}}}z");
        assert_eq!(fill_template("{{{A}}}{{{open", &values), "1{{{open");
    }

    #[test]
    fn test_report_url_joins_base_and_id() {
        let links = EmailLinks {
            report_url_base: "https://example.com/results/".into(),
            booking_url: "https://example.com/book".into(),
        };
        assert_eq!(links.report_url("abc"), "https://example.com/results/abc");
    }
}
