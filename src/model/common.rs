use serde::{Deserialize, Serialize};

pub type Id = String;

/// Every record kept by the store: it knows its collection name and its id.
pub trait Record: Clone + Serialize + serde::de::DeserializeOwned {
    const COLLECTION: &'static str;

    fn id(&self) -> &Id;
    fn set_id(&mut self, id: Id);
}

/// Implements [`Record`] for a struct with an `id: Id` field.
macro_rules! impl_record {
    ($ty:ty, $collection:literal) => {
        impl $crate::model::Record for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> &$crate::model::Id {
                &self.id
            }

            fn set_id(&mut self, id: $crate::model::Id) {
                self.id = id;
            }
        }
    };
}

pub(crate) use impl_record;

/// Current time as an RFC 3339 timestamp
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Placeholder for records that get their id from the store on create
pub fn unassigned_id() -> Id {
    String::new()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: Id,
    pub name: String,
}

impl Principal {
    pub fn new(id: Id, name: String) -> Self {
        Self { id, name }
    }
}
