//! Filter evaluation against raw documents.
//!
//! A filter map combines all of its top-level entries with logical AND.
//! Values are either a bare scalar (equality) or an operator object with
//! `$eq`, `$ne` and `$contains`; `$and`/`$or` compose arrays of sub-filters.
//! Field paths may traverse relationship fields with dots
//! (`categories.slug`), matching ANY of the referenced documents.

use crate::spec::CollectionSpec;
use kabar_core::{JsonValue, Map};

/// Read access to raw documents and collection metadata during matching.
pub(crate) trait DocumentIndex {
    /// Returns the metadata of a collection.
    fn spec(&self, collection: &str) -> Option<&CollectionSpec>;

    /// Returns the raw document with the given id.
    fn get(&self, collection: &str, id: i64) -> Option<&Map>;
}

/// Returns `true` if the document satisfies all filter entries.
pub(crate) fn matches(
    index: &dyn DocumentIndex,
    collection: &str,
    doc: &Map,
    filters: &Map,
) -> bool {
    filters.iter().all(|(key, condition)| match key.as_str() {
        "$and" => condition
            .as_array()
            .is_some_and(|list| list.iter().all(|f| matches_value(index, collection, doc, f))),
        "$or" => condition
            .as_array()
            .is_some_and(|list| list.iter().any(|f| matches_value(index, collection, doc, f))),
        path => field_matches(index, collection, doc, path, condition),
    })
}

fn matches_value(
    index: &dyn DocumentIndex,
    collection: &str,
    doc: &Map,
    filters: &JsonValue,
) -> bool {
    filters
        .as_object()
        .is_some_and(|filters| matches(index, collection, doc, filters))
}

fn field_matches(
    index: &dyn DocumentIndex,
    collection: &str,
    doc: &Map,
    path: &str,
    condition: &JsonValue,
) -> bool {
    let candidates = leaf_values(index, collection, doc, path);
    if let Some(operators) = operator_map(condition) {
        operators
            .iter()
            .all(|(op, target)| apply_operator(op, target, &candidates))
    } else {
        apply_operator("$eq", condition, &candidates)
    }
}

/// Returns the condition as an operator object if every key is an operator.
fn operator_map(condition: &JsonValue) -> Option<&Map> {
    condition
        .as_object()
        .filter(|map| !map.is_empty() && map.keys().all(|key| key.starts_with('$')))
}

fn apply_operator(op: &str, target: &JsonValue, candidates: &[JsonValue]) -> bool {
    match op {
        "$eq" => equals(target, candidates),
        "$ne" => !equals(target, candidates),
        "$contains" => {
            let Some(needle) = target.as_str() else {
                return false;
            };
            let needle = needle.to_lowercase();
            candidates.iter().any(|value| {
                value
                    .as_str()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
        }
        _ => false,
    }
}

/// Equality over the candidate leaves; a missing field equals only null.
fn equals(target: &JsonValue, candidates: &[JsonValue]) -> bool {
    if candidates.is_empty() {
        target.is_null()
    } else {
        candidates.iter().any(|value| value == target)
    }
}

/// Collects the leaf values addressed by a dotted field path.
///
/// Traversing a relationship field resolves ids against the target
/// collection; documents already populated inline are used as-is. An array
/// along the path fans out to every element.
fn leaf_values(
    index: &dyn DocumentIndex,
    collection: &str,
    doc: &Map,
    path: &str,
) -> Vec<JsonValue> {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let Some(value) = doc.get(head) else {
        return Vec::new();
    };
    let Some(rest) = rest else {
        return match value {
            JsonValue::Array(items) => items.to_vec(),
            _ => vec![value.clone()],
        };
    };

    let relation = index.spec(collection).and_then(|spec| spec.relation(head));
    let elements: Vec<&JsonValue> = match value {
        JsonValue::Array(items) => items.iter().collect(),
        _ => vec![value],
    };
    let mut leaves = Vec::new();
    for element in elements {
        if let Some(relation) = relation {
            let related = match element {
                JsonValue::Object(map) => Some(map.clone()),
                JsonValue::Number(_) => element
                    .as_i64()
                    .and_then(|id| index.get(relation.target, id).cloned()),
                _ => None,
            };
            if let Some(related) = related {
                leaves.extend(leaf_values(index, relation.target, &related, rest));
            }
        } else if let JsonValue::Object(map) = element {
            leaves.extend(leaf_values(index, collection, map, rest));
        }
    }
    leaves
}

#[cfg(test)]
mod tests {
    use super::{DocumentIndex, matches};
    use crate::spec::{CollectionSpec, RelationField};
    use kabar_core::{Map, json};
    use std::collections::HashMap;

    const ARTICLES: CollectionSpec = CollectionSpec {
        name: "articles",
        relations: &[
            RelationField::one("author", "authors"),
            RelationField::many("categories", "categories"),
        ],
        unique_fields: &["slug"],
    };
    const CATEGORIES: CollectionSpec = CollectionSpec {
        name: "categories",
        relations: &[RelationField::one("parent", "categories")],
        unique_fields: &["slug"],
    };

    struct Index {
        docs: HashMap<(&'static str, i64), Map>,
    }

    impl DocumentIndex for Index {
        fn spec(&self, collection: &str) -> Option<&CollectionSpec> {
            match collection {
                "articles" => Some(&ARTICLES),
                "categories" => Some(&CATEGORIES),
                _ => None,
            }
        }

        fn get(&self, collection: &str, id: i64) -> Option<&Map> {
            self.docs
                .iter()
                .find(|((name, doc_id), _)| *name == collection && *doc_id == id)
                .map(|(_, doc)| doc)
        }
    }

    fn index() -> Index {
        let mut docs = HashMap::new();
        for (id, name, slug) in [(1, "Berita", "berita"), (2, "Opini", "opini")] {
            let category = json!({ "id": id, "name": name, "slug": slug, "is_active": true });
            docs.insert(("categories", id), category.as_object().unwrap().clone());
        }
        Index { docs }
    }

    fn article() -> Map {
        json!({
            "id": 7,
            "title": "Mahasiswa Hebat",
            "excerpt": "Prestasi PPIDK di kancah internasional",
            "status": "published",
            "categories": [1, 2],
            "view_count": 42,
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn it_matches_scalar_equality() {
        let index = index();
        let doc = article();
        let filters = json!({ "status": "published" });
        assert!(matches(&index, "articles", &doc, filters.as_object().unwrap()));

        let filters = json!({ "status": "draft" });
        assert!(!matches(&index, "articles", &doc, filters.as_object().unwrap()));
    }

    #[test]
    fn it_applies_negation_and_missing_fields() {
        let index = index();
        let doc = article();
        let filters = json!({ "id": { "$ne": 7 } });
        assert!(!matches(&index, "articles", &doc, filters.as_object().unwrap()));

        let filters = json!({ "id": { "$ne": 8 } });
        assert!(matches(&index, "articles", &doc, filters.as_object().unwrap()));

        // A missing field never matches, except under `$ne`.
        let filters = json!({ "rubric": "unknown" });
        assert!(!matches(&index, "articles", &doc, filters.as_object().unwrap()));
        let filters = json!({ "is_featured": { "$ne": true } });
        assert!(matches(&index, "articles", &doc, filters.as_object().unwrap()));
    }

    #[test]
    fn it_matches_substrings_case_insensitively() {
        let index = index();
        let doc = article();
        let filters = json!({ "excerpt": { "$contains": "ppidk" } });
        assert!(matches(&index, "articles", &doc, filters.as_object().unwrap()));

        let filters = json!({ "title": { "$contains": "HEBAT" } });
        assert!(matches(&index, "articles", &doc, filters.as_object().unwrap()));

        let filters = json!({ "title": { "$contains": "tidak ada" } });
        assert!(!matches(&index, "articles", &doc, filters.as_object().unwrap()));
    }

    #[test]
    fn it_traverses_relation_paths() {
        let index = index();
        let doc = article();
        let filters = json!({ "categories.slug": "opini" });
        assert!(matches(&index, "articles", &doc, filters.as_object().unwrap()));

        let filters = json!({ "categories.slug": "olahraga" });
        assert!(!matches(&index, "articles", &doc, filters.as_object().unwrap()));
    }

    #[test]
    fn it_composes_boolean_clauses() {
        let index = index();
        let doc = article();
        let filters = json!({
            "$and": [
                { "status": "published" },
                { "$or": [
                    { "categories.id": 1 },
                    { "categories.id": 9 },
                ] },
            ],
        });
        assert!(matches(&index, "articles", &doc, filters.as_object().unwrap()));

        // An empty `$or` list matches nothing.
        let filters = json!({ "$or": [] });
        assert!(!matches(&index, "articles", &doc, filters.as_object().unwrap()));
    }
}
