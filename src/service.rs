//! Quiz session orchestration.
//!
//! [`QuizService`] wires the pure engine to its collaborators: it scores and
//! classifies a completed session, finalizes the result, and runs the two
//! lead flows. Store and mail failures around the engine are logged; they
//! never take the computed result away from the caller.

use crate::classification::{classify, ManagerType};
use crate::core::{AnswerSubmission, CategoryScores, Error, Result};
use crate::email::{
    render_consultation_email, render_report_email, send_best_effort, EmailLinks, MailTransport,
    OutgoingMail,
};
use crate::leads::{ConsultationBooking, LeadRecord, ReportRequest};
use crate::persistence::{FinalizeOutcome, LeadStore, ResultRecord, ResultSnapshot, ResultStore};
use crate::scoring::{ScoreNormalizer, ScoringWarning};
use serde::Serialize;
use std::sync::Arc;

/// What a completed session produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOutcome {
    pub result_id: String,
    pub manager_type: ManagerType,
    pub scores: CategoryScores,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoringWarning>,
    /// `None` when the store could not be reached.
    pub finalize: Option<FinalizeOutcome>,
}

/// Returned from both lead flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadReceipt {
    pub lead_id: String,
    pub email_sent: bool,
}

pub struct QuizService {
    normalizer: ScoreNormalizer,
    results: Arc<dyn ResultStore>,
    leads: Arc<dyn LeadStore>,
    mailer: Arc<dyn MailTransport>,
    links: EmailLinks,
}

impl QuizService {
    pub fn new(
        normalizer: ScoreNormalizer,
        results: Arc<dyn ResultStore>,
        leads: Arc<dyn LeadStore>,
        mailer: Arc<dyn MailTransport>,
        links: EmailLinks,
    ) -> Self {
        Self {
            normalizer,
            results,
            leads,
            mailer,
            links,
        }
    }

    pub fn normalizer(&self) -> &ScoreNormalizer {
        &self.normalizer
    }

    /// Score, classify and finalize a completed session.
    pub fn complete_session(
        &self,
        result_id: &str,
        responses: &[AnswerSubmission],
    ) -> QuizOutcome {
        let aggregation = self.normalizer.aggregate_with_diagnostics(responses);
        let manager_type = classify(&aggregation.scores);
        let snapshot = ResultSnapshot {
            manager_type,
            scores: aggregation.scores,
        };

        let (finalize, snapshot) = match self.results.finalize(result_id, &snapshot) {
            Ok(outcome) if outcome == FinalizeOutcome::UNCHANGED => {
                (Some(outcome), self.stored_snapshot(result_id).unwrap_or(snapshot))
            }
            Ok(outcome) => (Some(outcome), snapshot),
            Err(e) => {
                tracing::warn!(result_id, error = %e, "Failed to finalize result");
                (None, snapshot)
            }
        };

        QuizOutcome {
            result_id: result_id.to_string(),
            manager_type: snapshot.manager_type,
            scores: snapshot.scores,
            warnings: aggregation.warnings,
            finalize,
        }
    }

    /// Snapshot of an already finalized result, so a repeat session reports
    /// what later emails will use.
    fn stored_snapshot(&self, result_id: &str) -> Option<ResultSnapshot> {
        match self.results.get(result_id) {
            Ok(Some(record)) => {
                tracing::debug!(result_id, "Result already finalized, kept stored snapshot");
                Some(record.snapshot())
            }
            Ok(None) => {
                tracing::warn!(result_id, "Finalized result vanished from the store");
                None
            }
            Err(e) => {
                tracing::warn!(result_id, error = %e, "Failed to read finalized result");
                None
            }
        }
    }

    /// Record a detailed-report request and mail the report link.
    pub fn request_report(&self, request: &ReportRequest) -> Result<LeadReceipt> {
        request.contact.check()?;
        let record = self.finalized_result(&request.result_id)?;

        let lead = LeadRecord::from_report_request(request, record.manager_type);
        self.leads.record_lead(&lead)?;

        let email = render_report_email(
            &request.contact.name,
            record.manager_type,
            request.contact.company_size,
            &self.links.report_url(&record.id),
            &self.links.booking_url,
        );
        let email_sent = send_best_effort(
            self.mailer.as_ref(),
            &OutgoingMail::new(request.contact.email.trim(), email),
        );

        Ok(LeadReceipt {
            lead_id: lead.id,
            email_sent,
        })
    }

    /// Record a consultation booking and mail a confirmation.
    pub fn book_consultation(&self, booking: &ConsultationBooking) -> Result<LeadReceipt> {
        booking.contact.check()?;
        if booking.preferred_slot.trim().is_empty() {
            return Err(Error::InvalidLead("preferred slot is empty".into()));
        }
        let record = self.finalized_result(&booking.result_id)?;

        let lead = LeadRecord::from_booking(booking, record.manager_type);
        self.leads.record_lead(&lead)?;

        let email = render_consultation_email(
            booking,
            record.manager_type,
            &self.links.report_url(&record.id),
        );
        let email_sent = send_best_effort(
            self.mailer.as_ref(),
            &OutgoingMail::new(booking.contact.email.trim(), email),
        );

        Ok(LeadReceipt {
            lead_id: lead.id,
            email_sent,
        })
    }

    fn finalized_result(&self, result_id: &str) -> Result<ResultRecord> {
        match self.results.get(result_id)? {
            Some(record) if record.finalized => Ok(record),
            _ => Err(Error::ResultNotFound(result_id.to_string())),
        }
    }
}
