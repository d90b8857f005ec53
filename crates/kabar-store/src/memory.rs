//! In-process store backend.

use crate::{
    filter::{self, DocumentIndex},
    source::{ContentSource, Page},
    spec::{CollectionSpec, GlobalSpec, RelationField},
};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use kabar_core::{JsonValue, Map, error::Error, extension::JsonObjectExt, model::Query};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// A seedable in-process backend satisfying the store contract.
///
/// Collections are guarded by a single read-write lock; ids are assigned
/// monotonically per collection. This backend is not a storage engine: it
/// keeps nothing on disk and exists for tests, seeding and single-process
/// deployments.
pub struct MemoryStore {
    collections: &'static [CollectionSpec],
    globals: &'static [GlobalSpec],
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<&'static str, BTreeMap<i64, Map>>,
    globals: HashMap<String, Map>,
}

impl MemoryStore {
    /// Creates an empty store for the given collections and globals.
    pub fn new(collections: &'static [CollectionSpec], globals: &'static [GlobalSpec]) -> Self {
        let mut inner = Inner::default();
        for spec in collections {
            inner.collections.insert(spec.name, BTreeMap::new());
        }
        Self {
            collections,
            globals,
            inner: RwLock::new(inner),
        }
    }

    fn spec_of(&self, collection: &str) -> Result<&CollectionSpec, Error> {
        self.collections
            .iter()
            .find(|spec| spec.name == collection)
            .ok_or_else(|| Error::new(format!("unknown collection `{collection}`")))
    }

    fn global_spec(&self, slug: &str) -> Option<&GlobalSpec> {
        self.globals.iter().find(|spec| spec.slug == slug)
    }

    fn check_unique(
        &self,
        inner: &Inner,
        spec: &CollectionSpec,
        data: &Map,
        excluded_id: Option<i64>,
    ) -> Result<(), Error> {
        let docs = inner.collections.get(spec.name);
        for &field in spec.unique_fields {
            let Some(value) = data.get(field) else {
                continue;
            };
            let taken = docs.is_some_and(|docs| {
                docs.iter().any(|(&id, doc)| {
                    Some(id) != excluded_id && doc.get(field) == Some(value)
                })
            });
            if taken {
                let collection = spec.name;
                return Err(Error::new(format!(
                    "the `{field}` field of `{collection}` should be unique"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for MemoryStore {
    async fn find(&self, collection: &str, query: &Query) -> Result<Page, Error> {
        let spec = self.spec_of(collection)?;
        let inner = self.inner.read();
        let snapshot = Snapshot { inner: &*inner, collections: self.collections };

        let docs = inner
            .collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter::matches(&snapshot, collection, doc, query.filters()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut docs = docs;
        sort_docs(&mut docs, query.sort_order());

        let total_docs = docs.len() as u64;
        let offset = query.offset().min(total_docs) as usize;
        let end = offset.saturating_add(query.page_size() as usize).min(docs.len());
        let mut page_docs = docs[offset..end].iter().map(|&doc| doc.clone()).collect::<Vec<_>>();
        for doc in &mut page_docs {
            populate(&snapshot, spec, doc, query.depth());
        }
        tracing::debug!(collection, total_docs, page = query.page(), "collection query");
        Ok(Page::new(page_docs, total_docs, query.page(), query.page_size()))
    }

    async fn find_one(&self, collection: &str, query: &Query) -> Result<Option<Map>, Error> {
        let mut query = query.clone();
        query.set_page(1);
        query.set_page_size(1);
        let mut page = self.find(collection, &query).await?;
        Ok(page.docs.pop())
    }

    async fn find_by_id(&self, collection: &str, id: i64) -> Result<Option<Map>, Error> {
        self.spec_of(collection)?;
        let inner = self.inner.read();
        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.get(&id))
            .cloned())
    }

    async fn insert(&self, collection: &str, mut data: Map) -> Result<Map, Error> {
        let spec = self.spec_of(collection)?;
        let mut inner = self.inner.write();
        self.check_unique(&inner, spec, &data, None)?;

        let docs = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| Error::new(format!("unknown collection `{collection}`")))?;
        let id = match data.get_i64("id") {
            Some(id) => {
                if docs.contains_key(&id) {
                    return Err(Error::new(format!(
                        "a document with id `{id}` already exists in `{collection}`"
                    )));
                }
                id
            }
            None => docs.keys().next_back().map_or(1, |last| last + 1),
        };
        data.upsert("id", id);

        let now = timestamp();
        if !data.contains_key("created_at") {
            data.upsert("created_at", now.clone());
        }
        data.upsert("updated_at", now);
        docs.insert(id, data.clone());
        tracing::debug!(collection, id, "document inserted");
        Ok(data)
    }

    async fn update(&self, collection: &str, id: i64, updates: Map) -> Result<Map, Error> {
        let spec = self.spec_of(collection)?;
        let mut inner = self.inner.write();
        self.check_unique(&inner, spec, &updates, Some(id))?;

        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(&id))
            .ok_or_else(|| Error::new(format!("no document `{id}` in `{collection}`")))?;
        for (key, value) in updates {
            if key != "id" {
                doc.insert(key, value);
            }
        }
        doc.upsert("updated_at", timestamp());
        Ok(doc.clone())
    }

    async fn find_global(&self, slug: &str, depth: u8) -> Result<Option<Map>, Error> {
        let inner = self.inner.read();
        let Some(mut doc) = inner.globals.get(slug).cloned() else {
            return Ok(None);
        };
        if let Some(spec) = self.global_spec(slug) {
            let snapshot = Snapshot { inner: &*inner, collections: self.collections };
            populate_global(&snapshot, spec, &mut doc, depth);
        }
        Ok(Some(doc))
    }

    async fn put_global(&self, slug: &str, data: Map) -> Result<(), Error> {
        let mut inner = self.inner.write();
        inner.globals.insert(slug.to_owned(), data);
        Ok(())
    }
}

struct Snapshot<'a> {
    inner: &'a Inner,
    collections: &'static [CollectionSpec],
}

impl DocumentIndex for Snapshot<'_> {
    fn spec(&self, collection: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|spec| spec.name == collection)
    }

    fn get(&self, collection: &str, id: i64) -> Option<&Map> {
        self.inner
            .collections
            .get(collection)
            .and_then(|docs| docs.get(&id))
    }
}

#[inline]
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sorts documents by the requested fields; missing values and nulls order
/// last regardless of direction, ties keep the id order.
fn sort_docs(docs: &mut [&Map], sort_order: &[(kabar_core::SharedString, bool)]) {
    use std::cmp::Ordering;

    docs.sort_by(|a, b| {
        for (field, descending) in sort_order {
            let lhs = a.get(field.as_ref()).filter(|v| !v.is_null());
            let rhs = b.get(field.as_ref()).filter(|v| !v.is_null());
            let ordering = match (lhs, rhs) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(lhs), Some(rhs)) => {
                    let ordering = compare_values(lhs, rhs);
                    if *descending { ordering.reverse() } else { ordering }
                }
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn compare_values(lhs: &JsonValue, rhs: &JsonValue) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (lhs, rhs) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (JsonValue::String(a), JsonValue::String(b)) => a.cmp(b),
        (JsonValue::Bool(a), JsonValue::Bool(b)) => a.cmp(b),
        _ => lhs.to_string().cmp(&rhs.to_string()),
    }
}

/// Resolves relationship ids into documents down to the requested depth.
///
/// Relation fields may be dotted paths into nested groups or arrays
/// (`seo.og_image`, `gallery.image`).
fn populate(snapshot: &Snapshot<'_>, spec: &CollectionSpec, doc: &mut Map, depth: u8) {
    if depth == 0 {
        return;
    }
    for relation in spec.relations {
        if relation.field.contains('.') {
            let segments = relation.field.split('.').collect::<Vec<_>>();
            populate_at(snapshot, doc, &segments, relation, depth);
        } else if let Some(value) = doc.get_mut(relation.field) {
            let resolved = resolve_relation(snapshot, value.take(), relation, depth);
            *value = resolved;
        }
    }
}

fn resolve_relation(
    snapshot: &Snapshot<'_>,
    value: JsonValue,
    relation: &RelationField,
    depth: u8,
) -> JsonValue {
    match value {
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(|item| resolve_relation(snapshot, item, relation, depth))
                .collect(),
        ),
        JsonValue::Number(ref id) => {
            let resolved = id
                .as_i64()
                .and_then(|id| snapshot.get(relation.target, id).cloned());
            match resolved {
                Some(mut doc) => {
                    if let Some(spec) = snapshot.spec(relation.target) {
                        populate(snapshot, spec, &mut doc, depth - 1);
                    }
                    JsonValue::Object(doc)
                }
                // A dangling reference stays an id.
                None => value,
            }
        }
        other => other,
    }
}

/// Populates a global's relationship fields, addressed by dotted paths.
fn populate_global(snapshot: &Snapshot<'_>, spec: &GlobalSpec, doc: &mut Map, depth: u8) {
    if depth == 0 {
        return;
    }
    for relation in spec.relations {
        let segments = relation.field.split('.').collect::<Vec<_>>();
        populate_at(snapshot, doc, &segments, relation, depth);
    }
}

fn populate_at(
    snapshot: &Snapshot<'_>,
    map: &mut Map,
    segments: &[&str],
    relation: &RelationField,
    depth: u8,
) {
    let Some((&head, rest)) = segments.split_first() else {
        return;
    };
    let Some(value) = map.get_mut(head) else {
        return;
    };
    if rest.is_empty() {
        *value = resolve_relation(snapshot, value.take(), relation, depth);
        return;
    }
    match value {
        JsonValue::Array(items) => {
            for item in items {
                if let JsonValue::Object(item) = item {
                    populate_at(snapshot, item, rest, relation, depth);
                }
            }
        }
        JsonValue::Object(nested) => populate_at(snapshot, nested, rest, relation, depth),
        _ => {}
    }
}
