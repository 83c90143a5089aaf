use super::records::{check_result_id, plan_write, ResultRecord, ResultSnapshot, WriteAction};
use super::{FinalizeOutcome, LeadStore, ResultStore};
use crate::core::Result;
use crate::leads::LeadRecord;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

/// In-process store. The per-key entry lock makes each finalize a single
/// atomic read-check-write.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    results: DashMap<String, ResultRecord>,
    leads: Mutex<Vec<LeadRecord>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn write(&self, id: &str, snapshot: &ResultSnapshot, finalized: bool) -> Result<WriteAction> {
        check_result_id(id)?;
        let action = match self.results.entry(id.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(ResultRecord::new(id, snapshot, finalized));
                WriteAction::Create
            }
            Entry::Occupied(mut occupied) => {
                let action = plan_write(Some(occupied.get()));
                if action == WriteAction::Update {
                    occupied.get_mut().apply(snapshot, finalized);
                }
                action
            }
        };
        Ok(action)
    }
}

impl ResultStore for MemoryResultStore {
    fn finalize(&self, id: &str, snapshot: &ResultSnapshot) -> Result<FinalizeOutcome> {
        Ok(self.write(id, snapshot, true)?.outcome())
    }

    fn save_draft(&self, id: &str, snapshot: &ResultSnapshot) -> Result<bool> {
        Ok(self.write(id, snapshot, false)? != WriteAction::Skip)
    }

    fn get(&self, id: &str) -> Result<Option<ResultRecord>> {
        Ok(self.results.get(id).map(|record| record.value().clone()))
    }
}

impl LeadStore for MemoryResultStore {
    fn record_lead(&self, lead: &LeadRecord) -> Result<()> {
        self.leads.lock().push(lead.clone());
        Ok(())
    }

    fn leads(&self) -> Result<Vec<LeadRecord>> {
        Ok(self.leads.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ManagerType;
    use crate::core::CategoryScores;
    use std::sync::Arc;

    fn snapshot(manager_type: ManagerType, value: f64) -> ResultSnapshot {
        ResultSnapshot {
            manager_type,
            scores: CategoryScores::uniform(value),
        }
    }

    #[test]
    fn test_finalize_twice_is_noop() {
        let store = MemoryResultStore::new();
        let first = snapshot(ManagerType::Outdated, 1.5);

        assert_eq!(store.finalize("r1", &first).unwrap(), FinalizeOutcome::CREATED);
        assert_eq!(store.finalize("r1", &first).unwrap(), FinalizeOutcome::UNCHANGED);

        let later = snapshot(ManagerType::Balanced, 0.5);
        assert_eq!(store.finalize("r1", &later).unwrap(), FinalizeOutcome::UNCHANGED);
        assert_eq!(store.get("r1").unwrap().unwrap().snapshot(), first);
    }

    #[test]
    fn test_finalize_upgrades_draft() {
        let store = MemoryResultStore::new();
        let draft = snapshot(ManagerType::SoloPlayer, 2.0);
        let confirmed = snapshot(ManagerType::Overstretched, 2.1);

        assert!(store.save_draft("r2", &draft).unwrap());
        assert_eq!(
            store.finalize("r2", &confirmed).unwrap(),
            FinalizeOutcome::UPDATED
        );
        let record = store.get("r2").unwrap().unwrap();
        assert!(record.finalized);
        assert_eq!(record.snapshot(), confirmed);

        // A late draft can no longer overwrite the finalized result.
        assert!(!store.save_draft("r2", &draft).unwrap());
        assert_eq!(store.get("r2").unwrap().unwrap().snapshot(), confirmed);
    }

    #[test]
    fn test_rejects_invalid_id() {
        let store = MemoryResultStore::new();
        assert!(store
            .finalize("../x", &snapshot(ManagerType::Balanced, 0.0))
            .is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_finalize_creates_once() {
        let store = Arc::new(MemoryResultStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .finalize("race", &snapshot(ManagerType::ALL[i % 7], 1.0))
                        .unwrap()
                })
            })
            .collect();

        let outcomes: Vec<FinalizeOutcome> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        let created = outcomes.iter().filter(|o| o.created).count();
        let updated = outcomes.iter().filter(|o| o.updated).count();
        assert_eq!(created, 1);
        assert_eq!(updated, 0);
        assert_eq!(store.len(), 1);
    }
}
