//! Recording store mocks shared by the link and unlink tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{AccountLinkHandler, LinkStores};
use crate::domain::linking::{LinkingRecord, MappingRecord, StoredRecord, UserRecord};
use crate::ports::{RecordStore, StoreError};

/// Ordered log of writes across all three stores, as `collection.op:id`.
#[derive(Default, Clone)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn writes(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct MockStore<R> {
    records: Mutex<HashMap<String, R>>,
    journal: Journal,
    reject_writes: Mutex<bool>,
    failure: Mutex<Option<StoreError>>,
}

impl<R: StoredRecord> MockStore<R> {
    fn new(journal: Journal) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            journal,
            reject_writes: Mutex::new(false),
            failure: Mutex::new(None),
        }
    }

    /// Makes add/update return `None` and delete return `false`.
    pub fn reject_writes(&self) {
        *self.reject_writes.lock().unwrap() = true;
    }

    /// Makes every call fail with `err`.
    pub fn fail_with(&self, err: StoreError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn seed(&self, record: R) {
        self.records
            .lock()
            .unwrap()
            .insert(record.id().to_string(), record);
    }

    pub fn record(&self, id: &str) -> Option<R> {
        self.records.lock().unwrap().get(id).cloned()
    }

    fn check(&self) -> Result<bool, StoreError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(*self.reject_writes.lock().unwrap()),
        }
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for MockStore<R> {
    async fn get_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        self.check()?;
        Ok(self.record(id))
    }

    async fn add(&self, record: R) -> Result<Option<R>, StoreError> {
        let rejected = self.check()?;
        self.journal.push(format!("{}.add:{}", R::COLLECTION, record.id()));
        let mut records = self.records.lock().unwrap();
        if rejected || records.contains_key(record.id()) {
            return Ok(None);
        }
        records.insert(record.id().to_string(), record.clone());
        Ok(Some(record))
    }

    async fn update(&self, record: R) -> Result<Option<R>, StoreError> {
        let rejected = self.check()?;
        self.journal
            .push(format!("{}.update:{}", R::COLLECTION, record.id()));
        let mut records = self.records.lock().unwrap();
        if rejected || !records.contains_key(record.id()) {
            return Ok(None);
        }
        records.insert(record.id().to_string(), record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let rejected = self.check()?;
        self.journal.push(format!("{}.delete:{}", R::COLLECTION, id));
        if rejected {
            return Ok(false);
        }
        Ok(self.records.lock().unwrap().remove(id).is_some())
    }
}

pub struct Fixture {
    pub handler: AccountLinkHandler,
    pub journal: Journal,
    pub linking: Arc<MockStore<LinkingRecord>>,
    pub users: Arc<MockStore<UserRecord>>,
    pub mappings: Arc<MockStore<MappingRecord>>,
}

impl Fixture {
    pub fn seed_linking(&self, record: LinkingRecord) {
        self.linking.seed(record);
    }

    pub fn seed_user(&self, record: UserRecord) {
        self.users.seed(record);
    }

    pub fn seed_mapping(&self, record: MappingRecord) {
        self.mappings.seed(record);
    }
}

pub fn fixture(user_id_field: &str) -> Fixture {
    let journal = Journal::default();
    let linking = Arc::new(MockStore::new(journal.clone()));
    let users = Arc::new(MockStore::new(journal.clone()));
    let mappings = Arc::new(MockStore::new(journal.clone()));

    let stores = LinkStores {
        linking: linking.clone(),
        users: users.clone(),
        mappings: mappings.clone(),
    };

    Fixture {
        handler: AccountLinkHandler::new(stores, user_id_field),
        journal,
        linking,
        users,
        mappings,
    }
}
