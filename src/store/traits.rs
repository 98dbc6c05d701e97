use crate::model::{Id, Record};
use crate::store::fixtures::Fixtures;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no {collection} record with id {id}")]
    UnknownRecord { collection: &'static str, id: Id },
    #[error("{collection} record with id {id} already exists")]
    DuplicateId { collection: &'static str, id: Id },
    #[error("failed to encode {collection} record")]
    Serialization {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Record store the mock backend serves from. Every record type lives in its
/// own collection, keyed by id, in insertion order.
pub trait Store: Send + Sync {
    /// Get a record by id
    fn find<R: Record>(&self, id: &Id) -> StoreResult<Option<R>>;
    /// All records of a collection matching the predicate, in insertion order
    fn filter<R: Record, P: Fn(&R) -> bool>(&self, predicate: P) -> StoreResult<Vec<R>>;
    /// Store a new record under the next free id and return it with that id
    fn create<R: Record>(&self, record: R) -> StoreResult<R>;
    /// Store a record under the id it already carries
    fn insert<R: Record>(&self, record: R) -> StoreResult<R>;
    /// Replace an existing record with the same id
    fn update<R: Record>(&self, record: R) -> StoreResult<()>;

    /// First record matching the predicate
    fn find_by<R: Record, P: Fn(&R) -> bool>(&self, predicate: P) -> StoreResult<Option<R>> {
        Ok(self.filter(predicate)?.into_iter().next())
    }

    fn all<R: Record>(&self) -> StoreResult<Vec<R>> {
        self.filter(|_: &R| true)
    }

    /// Load the records that must exist before seeding
    fn load_fixtures(&self, fixtures: &Fixtures) -> StoreResult<()> {
        for workspace in &fixtures.workspaces {
            self.insert(workspace.clone())?;
        }
        for user in &fixtures.users {
            self.insert(user.clone())?;
        }
        for database in &fixtures.databases {
            self.insert(database.clone())?;
        }
        Ok(())
    }
}
