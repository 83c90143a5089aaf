use super::records::{check_result_id, plan_write, ResultRecord, ResultSnapshot, WriteAction};
use super::{FinalizeOutcome, LeadStore, ResultStore};
use crate::core::{Error, Result, ResultExt};
use crate::leads::LeadRecord;
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

const RESULTS_DIR: &str = "results";
const LEADS_FILE: &str = "leads.jsonl";

/// File-backed store: one pretty-printed JSON document per result under
/// `<data_dir>/results/`, leads appended to `<data_dir>/leads.jsonl`.
///
/// All writes go through one lock, so read-check-write sequences from the
/// same process never interleave. Separate processes sharing a directory are
/// not coordinated.
#[derive(Debug)]
pub struct JsonFileResultStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileResultStore {
    /// Open a store, creating the directory layout if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let results = root.join(RESULTS_DIR);
        fs::create_dir_all(&results).map_err(|e| Error::io_at(e, &results))?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(RESULTS_DIR).join(format!("{}.json", id))
    }

    fn read_record(&self, id: &str) -> Result<Option<ResultRecord>> {
        let path = self.record_path(id);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let record = serde_json::from_str(&contents).map_err(|e| {
                    Error::Storage(format!("corrupt record {}: {}", path.display(), e))
                })?;
                Ok(Some(record))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_at(e, path)),
        }
    }

    fn write_record(&self, record: &ResultRecord) -> Result<()> {
        let path = self.record_path(&record.id);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&tmp, json).map_err(|e| Error::io_at(e, &tmp))?;
        fs::rename(&tmp, &path).map_err(|e| Error::io_at(e, &path))?;
        Ok(())
    }

    fn write(&self, id: &str, snapshot: &ResultSnapshot, finalized: bool) -> Result<WriteAction> {
        check_result_id(id)?;
        let _guard = self.lock.lock();

        let existing = self.read_record(id)?;
        let action = plan_write(existing.as_ref());
        match (action, existing) {
            (WriteAction::Create, _) => {
                self.write_record(&ResultRecord::new(id, snapshot, finalized))?;
            }
            (WriteAction::Update, Some(mut record)) => {
                record.apply(snapshot, finalized);
                self.write_record(&record)?;
            }
            _ => {}
        }
        Ok(action)
    }
}

impl ResultStore for JsonFileResultStore {
    fn finalize(&self, id: &str, snapshot: &ResultSnapshot) -> Result<FinalizeOutcome> {
        let action = self
            .write(id, snapshot, true)
            .context(format!("finalizing {}", id))?;
        if action != WriteAction::Skip {
            tracing::info!(result_id = id, ?action, "Finalized result");
        }
        Ok(action.outcome())
    }

    fn save_draft(&self, id: &str, snapshot: &ResultSnapshot) -> Result<bool> {
        let action = self
            .write(id, snapshot, false)
            .context(format!("saving draft {}", id))?;
        Ok(action != WriteAction::Skip)
    }

    fn get(&self, id: &str) -> Result<Option<ResultRecord>> {
        check_result_id(id)?;
        self.read_record(id)
    }
}

impl LeadStore for JsonFileResultStore {
    fn record_lead(&self, lead: &LeadRecord) -> Result<()> {
        let path = self.root.join(LEADS_FILE);
        let mut line = serde_json::to_string(lead)?;
        line.push('\n');

        let _guard = self.lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io_at(e, &path))?;
        file.write_all(line.as_bytes())
            .map_err(|e| Error::io_at(e, &path))?;
        tracing::info!(lead_id = %lead.id, kind = ?lead.kind, "Recorded lead");
        Ok(())
    }

    fn leads(&self) -> Result<Vec<LeadRecord>> {
        let path = self.root.join(LEADS_FILE);
        let _guard = self.lock.lock();
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io_at(e, path)),
        };

        let mut leads = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| Error::io_at(e, &path))?;
            if line.trim().is_empty() {
                continue;
            }
            leads.push(serde_json::from_str(&line)?);
        }
        Ok(leads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ManagerType;
    use crate::core::CategoryScores;
    use crate::leads::{CompanySize, Contact, ReportRequest};
    use tempfile::TempDir;

    fn snapshot(manager_type: ManagerType) -> ResultSnapshot {
        ResultSnapshot {
            manager_type,
            scores: CategoryScores::new([1.0, 2.0, 0.5, 3.0, 0.0, 1.25]),
        }
    }

    #[test]
    fn test_finalize_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileResultStore::open(dir.path()).unwrap();
        assert_eq!(
            store.finalize("r1", &snapshot(ManagerType::Outdated)).unwrap(),
            FinalizeOutcome::CREATED
        );

        let reopened = JsonFileResultStore::open(dir.path()).unwrap();
        let record = reopened.get("r1").unwrap().unwrap();
        assert!(record.finalized);
        assert_eq!(record.snapshot(), snapshot(ManagerType::Outdated));
        assert_eq!(
            reopened.finalize("r1", &snapshot(ManagerType::Balanced)).unwrap(),
            FinalizeOutcome::UNCHANGED
        );
    }

    #[test]
    fn test_draft_then_finalize() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileResultStore::open(dir.path()).unwrap();
        assert!(store.save_draft("r2", &snapshot(ManagerType::SoloPlayer)).unwrap());
        assert_eq!(
            store.finalize("r2", &snapshot(ManagerType::OrgBound)).unwrap(),
            FinalizeOutcome::UPDATED
        );
        assert_eq!(
            store.get("r2").unwrap().unwrap().manager_type,
            ManagerType::OrgBound
        );
        assert!(!dir.path().join("results/r2.json.tmp").exists());
    }

    #[test]
    fn test_missing_record_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileResultStore::open(dir.path()).unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
        assert!(store.leads().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileResultStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("results/bad.json"), "{not json").unwrap();
        assert!(matches!(store.get("bad"), Err(Error::Storage(_))));
    }

    #[test]
    fn test_leads_are_appended() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileResultStore::open(dir.path()).unwrap();
        let request = ReportRequest {
            result_id: "r1".into(),
            contact: Contact {
                name: "Aiko".into(),
                email: "aiko@example.com".into(),
                company: Some("Example KK".into()),
                company_size: CompanySize::Medium,
            },
        };
        let first = LeadRecord::from_report_request(&request, ManagerType::Disconnected);
        let second = LeadRecord::from_report_request(&request, ManagerType::Disconnected);
        store.record_lead(&first).unwrap();
        store.record_lead(&second).unwrap();

        let leads = store.leads().unwrap();
        assert_eq!(leads, vec![first, second]);
    }

    #[test]
    fn test_store_errors_name_the_operation() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileResultStore::open(dir.path()).unwrap();
        fs::remove_dir(dir.path().join(RESULTS_DIR)).unwrap();
        fs::write(dir.path().join(RESULTS_DIR), "").unwrap();

        let err = store
            .finalize("r1", &snapshot(ManagerType::Outdated))
            .unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().starts_with("finalizing r1: "));
    }

    #[test]
    fn test_leads_readable_during_concurrent_appends() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(JsonFileResultStore::open(dir.path()).unwrap());
        let request = ReportRequest {
            result_id: "r1".into(),
            contact: Contact {
                name: "Aiko".into(),
                email: "aiko@example.com".into(),
                company: None,
                company_size: CompanySize::Small,
            },
        };

        let writer = {
            let store = store.clone();
            let request = request.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let lead = LeadRecord::from_report_request(&request, ManagerType::Balanced);
                    store.record_lead(&lead).unwrap();
                }
            })
        };
        for _ in 0..50 {
            store.leads().unwrap();
        }
        writer.join().unwrap();

        assert_eq!(store.leads().unwrap().len(), 50);
    }
}
