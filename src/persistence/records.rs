use crate::classification::ManagerType;
use crate::core::{CategoryScores, Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MAX_RESULT_ID_LEN: usize = 128;

/// The computed part of a result: what finalize writes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub manager_type: ManagerType,
    pub scores: CategoryScores,
}

/// A stored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: String,
    pub manager_type: ManagerType,
    pub scores: CategoryScores,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn new(id: &str, snapshot: &ResultSnapshot, finalized: bool) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            manager_type: snapshot.manager_type,
            scores: snapshot.scores,
            finalized,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn snapshot(&self) -> ResultSnapshot {
        ResultSnapshot {
            manager_type: self.manager_type,
            scores: self.scores,
        }
    }

    /// Overwrite the computed fields, keeping the creation time.
    pub fn apply(&mut self, snapshot: &ResultSnapshot, finalized: bool) {
        self.manager_type = snapshot.manager_type;
        self.scores = snapshot.scores;
        self.finalized = finalized;
        self.updated_at = Utc::now();
    }
}

/// What a finalize call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinalizeOutcome {
    pub created: bool,
    pub updated: bool,
}

impl FinalizeOutcome {
    pub const CREATED: FinalizeOutcome = FinalizeOutcome {
        created: true,
        updated: false,
    };
    pub const UPDATED: FinalizeOutcome = FinalizeOutcome {
        created: false,
        updated: true,
    };
    pub const UNCHANGED: FinalizeOutcome = FinalizeOutcome {
        created: false,
        updated: false,
    };
}

/// Write a store must perform for a given existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
    Skip,
}

impl WriteAction {
    pub fn outcome(self) -> FinalizeOutcome {
        match self {
            WriteAction::Create => FinalizeOutcome::CREATED,
            WriteAction::Update => FinalizeOutcome::UPDATED,
            WriteAction::Skip => FinalizeOutcome::UNCHANGED,
        }
    }
}

/// Finalized records are never touched again; anything else is written.
pub fn plan_write(existing: Option<&ResultRecord>) -> WriteAction {
    match existing {
        None => WriteAction::Create,
        Some(record) if record.finalized => WriteAction::Skip,
        Some(_) => WriteAction::Update,
    }
}

/// Result ids double as file names in the JSON store, so they are limited
/// to ASCII letters, digits, `-` and `_`.
pub fn check_result_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= MAX_RESULT_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Storage(format!("invalid result id '{}'", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ResultSnapshot {
        ResultSnapshot {
            manager_type: ManagerType::SoloPlayer,
            scores: CategoryScores::uniform(2.0),
        }
    }

    #[test]
    fn test_plan_write() {
        let draft = ResultRecord::new("a", &snapshot(), false);
        let finalized = ResultRecord::new("a", &snapshot(), true);
        assert_eq!(plan_write(None), WriteAction::Create);
        assert_eq!(plan_write(Some(&draft)), WriteAction::Update);
        assert_eq!(plan_write(Some(&finalized)), WriteAction::Skip);
    }

    #[test]
    fn test_apply_keeps_created_at() {
        let mut record = ResultRecord::new("a", &snapshot(), false);
        let created_at = record.created_at;
        let other = ResultSnapshot {
            manager_type: ManagerType::Balanced,
            scores: CategoryScores::default(),
        };
        record.apply(&other, true);
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.snapshot(), other);
        assert!(record.finalized);
    }

    #[test]
    fn test_check_result_id() {
        assert!(check_result_id("abc-123_XYZ").is_ok());
        let too_long = "x".repeat(129);
        for bad in ["", "../etc/passwd", "a b", "dots.json", too_long.as_str()] {
            assert!(check_result_id(bad).is_err(), "{}", bad);
        }
    }
}
