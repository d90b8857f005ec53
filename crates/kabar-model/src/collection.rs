//! The editorial write path for typed collections.

use async_trait::async_trait;
use kabar_core::{Map, error::Error, model::Model};
use kabar_store::ContentSource;

/// A typed model stored in a named collection.
///
/// The provided `create`/`update` methods are the editorial write path: the
/// incoming data is merged with the stored document, the collection's save
/// rules run against the merged state, and the result goes to the store,
/// which enforces id assignment and unique fields.
#[async_trait]
pub trait Collection: Model {
    /// Collection name in the store.
    const NAME: &'static str;

    /// Applies the collection's save rules to the merged document.
    async fn before_save(_source: &dyn ContentSource, _data: &mut Map) -> Result<(), Error> {
        Ok(())
    }

    /// Inserts a new document and returns it as stored.
    async fn create(source: &dyn ContentSource, mut data: Map) -> Result<Self, Error> {
        Self::before_save(source, &mut data).await?;
        let doc = source.insert(Self::NAME, data).await?;
        Self::try_from_map(doc).map_err(Error::from)
    }

    /// Applies a partial update and returns the document as stored.
    async fn update(source: &dyn ContentSource, id: i64, updates: Map) -> Result<Self, Error> {
        let name = Self::NAME;
        let mut merged = source
            .find_by_id(name, id)
            .await?
            .ok_or_else(|| Error::new(format!("no document `{id}` in `{name}`")))?;
        for (key, value) in updates {
            merged.insert(key, value);
        }
        Self::before_save(source, &mut merged).await?;
        let doc = source.update(name, id, merged).await?;
        Self::try_from_map(doc).map_err(Error::from)
    }
}
