use super::{build_service, resolve_questionnaire};
use crate::cli::ContactArgs;
use crate::config::TypequizConfig;
use crate::leads::{ConsultationBooking, Contact, ReportRequest};
use crate::service::LeadReceipt;
use anyhow::{Context, Result};
use colored::*;

pub struct BookConfig {
    pub contact: ContactArgs,
    pub slot: String,
    pub message: Option<String>,
}

fn contact_from(args: &ContactArgs) -> Contact {
    Contact {
        name: args.name.clone(),
        email: args.email.clone(),
        company: args.company.clone(),
        company_size: args.company_size,
    }
}

fn print_receipt(receipt: &LeadReceipt, what: &str) {
    println!("{} {} recorded as {}", "✓".green(), what, receipt.lead_id);
    if receipt.email_sent {
        println!("  Confirmation email queued");
    } else {
        println!("  {}", "Confirmation email could not be queued".yellow());
    }
}

pub fn handle_report(config: &TypequizConfig, args: &ContactArgs) -> Result<()> {
    let service = build_service(config, resolve_questionnaire(config, None)?)?;
    let request = ReportRequest {
        result_id: args.result_id.clone(),
        contact: contact_from(args),
    };
    let receipt = service
        .request_report(&request)
        .with_context(|| format!("Report request for result {} failed", args.result_id))?;
    print_receipt(&receipt, "Report request");
    Ok(())
}

pub fn handle_book(config: &TypequizConfig, book: &BookConfig) -> Result<()> {
    let service = build_service(config, resolve_questionnaire(config, None)?)?;
    let booking = ConsultationBooking {
        result_id: book.contact.result_id.clone(),
        contact: contact_from(&book.contact),
        preferred_slot: book.slot.clone(),
        message: book.message.clone(),
    };
    let receipt = service
        .book_consultation(&booking)
        .with_context(|| format!("Booking for result {} failed", book.contact.result_id))?;
    print_receipt(&receipt, "Consultation booking");
    Ok(())
}
