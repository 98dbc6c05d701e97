use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::model::{Id, Record};
use crate::store::traits::{Store, StoreError, StoreResult};

/// Rows of one record type, in insertion order
#[derive(Debug, Default)]
struct Collection {
    rows: Vec<(Id, Value)>,
    /// Highest numeric id handed out or loaded so far
    last_id: u64,
}

impl Collection {
    fn position(&self, id: &Id) -> Option<usize> {
        self.rows.iter().position(|(row_id, _)| row_id == id)
    }

    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        self.last_id.to_string()
    }

    fn bump(&mut self, id: &Id) {
        if let Ok(numeric) = id.parse::<u64>() {
            self.last_id = self.last_id.max(numeric);
        }
    }
}

/// In-memory store with one collection per record type. Rows are kept as
/// JSON so the whole data set can be handed to the frontend as-is.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<&'static str, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record and restart id assignment
    pub fn reset(&self) {
        self.collections.write().clear();
    }

    /// Number of records in the collection of `R`
    pub fn count<R: Record>(&self) -> usize {
        self.collections
            .read()
            .get(R::COLLECTION)
            .map(|collection| collection.rows.len())
            .unwrap_or(0)
    }

    /// All collections as `{ "<collection>": [rows...] }`
    pub fn snapshot(&self) -> Value {
        let collections = self.collections.read();
        let mut object = Map::new();
        for (name, collection) in collections.iter() {
            let rows = collection.rows.iter().map(|(_, row)| row.clone()).collect();
            object.insert(name.to_string(), Value::Array(rows));
        }
        Value::Object(object)
    }

    fn encode<R: Record>(record: &R) -> StoreResult<Value> {
        serde_json::to_value(record).map_err(|source| StoreError::Serialization {
            collection: R::COLLECTION,
            source,
        })
    }

    fn decode<R: Record>(row: &Value) -> StoreResult<R> {
        R::deserialize(row).map_err(|source| StoreError::Serialization {
            collection: R::COLLECTION,
            source,
        })
    }
}

impl Store for MemoryStore {
    fn find<R: Record>(&self, id: &Id) -> StoreResult<Option<R>> {
        let collections = self.collections.read();
        let Some(collection) = collections.get(R::COLLECTION) else {
            return Ok(None);
        };

        collection
            .rows
            .iter()
            .find(|(row_id, _)| row_id == id)
            .map(|(_, row)| Self::decode(row))
            .transpose()
    }

    fn filter<R: Record, P: Fn(&R) -> bool>(&self, predicate: P) -> StoreResult<Vec<R>> {
        let collections = self.collections.read();
        let Some(collection) = collections.get(R::COLLECTION) else {
            return Ok(Vec::new());
        };

        let mut matches = Vec::new();
        for (_, row) in &collection.rows {
            let record: R = Self::decode(row)?;
            if predicate(&record) {
                matches.push(record);
            }
        }
        Ok(matches)
    }

    fn create<R: Record>(&self, mut record: R) -> StoreResult<R> {
        let mut collections = self.collections.write();
        let collection = collections.entry(R::COLLECTION).or_default();

        let mut id = collection.next_id();
        while collection.position(&id).is_some() {
            id = collection.next_id();
        }
        record.set_id(id.clone());

        let row = Self::encode(&record)?;
        collection.rows.push((id, row));
        Ok(record)
    }

    fn insert<R: Record>(&self, record: R) -> StoreResult<R> {
        let mut collections = self.collections.write();
        let collection = collections.entry(R::COLLECTION).or_default();

        let id = record.id().clone();
        if collection.position(&id).is_some() {
            return Err(StoreError::DuplicateId {
                collection: R::COLLECTION,
                id,
            });
        }

        let row = Self::encode(&record)?;
        collection.bump(&id);
        collection.rows.push((id, row));
        Ok(record)
    }

    fn update<R: Record>(&self, record: R) -> StoreResult<()> {
        let mut collections = self.collections.write();
        let id = record.id().clone();
        let position = collections
            .get(R::COLLECTION)
            .and_then(|collection| collection.position(&id));

        match (collections.get_mut(R::COLLECTION), position) {
            (Some(collection), Some(position)) => {
                collection.rows[position].1 = Self::encode(&record)?;
                Ok(())
            }
            _ => Err(StoreError::UnknownRecord {
                collection: R::COLLECTION,
                id,
            }),
        }
    }
}
