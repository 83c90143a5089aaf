//! Transactional email: rendering and the delivery seam.
//!
//! Delivery is always best-effort. A failed send is logged and reported as
//! `false`, never as an error to the caller.

mod templates;
mod transport;

pub use templates::{render_consultation_email, render_report_email, EmailLinks, RenderedEmail};
pub use transport::{
    send_best_effort, MailTransport, MemoryTransport, OutboxTransport, OutgoingMail,
};
