use super::RenderedEmail;
use crate::core::{Error, Result};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutgoingMail {
    pub fn new(to: impl Into<String>, rendered: RenderedEmail) -> Self {
        Self {
            to: to.into(),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        }
    }
}

/// Delivery seam for transactional mail.
pub trait MailTransport: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Send without letting a delivery failure escape. Returns whether the
/// transport accepted the mail.
pub fn send_best_effort(transport: &dyn MailTransport, mail: &OutgoingMail) -> bool {
    match transport.send(mail) {
        Ok(()) => {
            tracing::info!(to = %mail.to, subject = %mail.subject, "Sent email");
            true
        }
        Err(e) => {
            tracing::warn!(to = %mail.to, error = %e, "Email delivery failed");
            false
        }
    }
}

#[derive(Serialize)]
struct QueuedMail<'a> {
    from: &'a str,
    queued_at: String,
    #[serde(flatten)]
    mail: &'a OutgoingMail,
}

/// Writes each mail as a JSON document into an outbox directory for a
/// separate relay to pick up.
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    dir: PathBuf,
    from: String,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>, from: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            from: from.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(mail: &OutgoingMail, stamp: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(mail.to.as_bytes());
        hasher.update(mail.subject.as_bytes());
        hasher.update(stamp.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        format!("{}-{}.json", stamp, &digest[..12])
    }
}

impl MailTransport for OutboxTransport {
    fn send(&self, mail: &OutgoingMail) -> Result<()> {
        if !mail.to.contains('@') {
            return Err(Error::Mail(format!("invalid recipient '{}'", mail.to)));
        }
        fs::create_dir_all(&self.dir).map_err(|e| Error::io_at(e, &self.dir))?;

        let now = Utc::now();
        let stamp = now.format("%Y%m%dT%H%M%S%.6fZ").to_string();
        let queued = QueuedMail {
            from: &self.from,
            queued_at: now.to_rfc3339(),
            mail,
        };
        let path = self.dir.join(Self::file_name(mail, &stamp));
        let json = serde_json::to_string_pretty(&queued)?;
        fs::write(&path, json).map_err(|e| Error::io_at(e, &path))?;
        tracing::debug!(path = %path.display(), "Queued email in outbox");
        Ok(())
    }
}

/// Collects mail in memory. Can be told to fail every send.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<OutgoingMail>>,
    fail: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().clone()
    }
}

impl MailTransport for MemoryTransport {
    fn send(&self, mail: &OutgoingMail) -> Result<()> {
        if self.fail {
            return Err(Error::Mail("transport unavailable".into()));
        }
        self.sent.lock().push(mail.clone());
        Ok(())
    }
}
