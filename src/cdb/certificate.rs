//! In-memory journal of clause operations for an external proof writer.
use crate::types::*;

/// One step of a clause derivation certificate. `antecedents` lists the
/// identifiers of the clauses resolved over to derive an added clause; it
/// stays empty unless strict derivation recording is requested.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CertifiedRecord {
    /// a learnt clause entered the database.
    Add {
        uid: u64,
        lits: Vec<i32>,
        antecedents: Vec<u64>,
    },
    /// a clause left the database.
    Delete { uid: u64, lits: Vec<i32> },
}

/// Record of clause operations, drained by the proof-writing collaborator.
/// Serialization is the collaborator's business.
#[derive(Clone, Debug, Default)]
pub struct CertificationStore {
    queue: Vec<CertifiedRecord>,
    active: bool,
    strict: bool,
}

impl Instantiate for CertificationStore {
    fn instantiate(config: &Config, _cnf: &CNFDescription) -> Self {
        CertificationStore {
            queue: Vec::new(),
            active: config.use_certification,
            strict: config.strict_certification,
        }
    }
}

impl CertificationStore {
    pub fn is_active(&self) -> bool {
        self.active
    }
    /// record a derived clause with its antecedent chain.
    pub fn push_add(&mut self, uid: u64, lits: &[Lit], antecedents: &[u64]) {
        if !self.active {
            return;
        }
        self.queue.push(CertifiedRecord::Add {
            uid,
            lits: i32s(lits),
            antecedents: if self.strict {
                antecedents.to_vec()
            } else {
                Vec::new()
            },
        });
    }
    /// record a clause deletion.
    pub fn push_delete(&mut self, uid: u64, lits: &[Lit]) {
        if !self.active {
            return;
        }
        self.queue.push(CertifiedRecord::Delete {
            uid,
            lits: i32s(lits),
        });
    }
    /// hand the recorded steps over to the caller.
    pub fn take_journal(&mut self) -> Vec<CertifiedRecord> {
        std::mem::take(&mut self.queue)
    }
    pub fn len(&self) -> usize {
        self.queue.len()
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_records_only_when_active() {
        let mut store = CertificationStore::default();
        store.push_add(1, &[Lit::from(1i32)], &[]);
        assert!(store.is_empty());
        let config = Config {
            use_certification: true,
            strict_certification: true,
            ..Config::default()
        };
        let mut store = CertificationStore::instantiate(&config, &CNFDescription::default());
        store.push_add(1, &[Lit::from(1i32), Lit::from(-2i32)], &[7, 9]);
        store.push_delete(1, &[Lit::from(1i32), Lit::from(-2i32)]);
        let journal = store.take_journal();
        assert_eq!(journal.len(), 2);
        assert_eq!(
            journal[0],
            CertifiedRecord::Add {
                uid: 1,
                lits: vec![1, -2],
                antecedents: vec![7, 9],
            }
        );
        assert!(store.is_empty());
    }
}
