//! Remote store backend over the CMS REST API.

use crate::source::{ContentSource, Page};
use async_trait::async_trait;
use kabar_core::{Map, SharedString, error::Error, model::Query};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// A client for a remote headless CMS speaking the store contract over REST.
///
/// Collection reads map to `GET /api/{collection}` with the filter map passed
/// as a JSON-encoded `where` parameter; lookups and partial updates map to
/// `GET`/`PATCH /api/{collection}/{id}`, globals to `GET|POST
/// /api/globals/{slug}`. Transport failures propagate unchanged; there is no
/// retry.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindResponse {
    docs: Vec<Map>,
    total_docs: u64,
    total_pages: u64,
    page: u64,
}

impl HttpStore {
    /// Creates a new instance for the CMS at the base URL.
    pub fn try_new(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            base_url: base_url.parse::<Url>()?,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::new("the store base URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn expect_doc(&self, response: reqwest::Response) -> Result<Map, Error> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::new(format!("store request failed with status {status}")));
        }
        let mut body: Map = response.json().await?;
        // Mutation endpoints wrap the document as `{ "doc": ... }`.
        if let Some(doc) = body.remove("doc") {
            if let serde_json::Value::Object(doc) = doc {
                return Ok(doc);
            }
        }
        Ok(body)
    }
}

#[async_trait]
impl ContentSource for HttpStore {
    async fn find(&self, collection: &str, query: &Query) -> Result<Page, Error> {
        let url = self.endpoint(&["api", collection])?;
        let response = self
            .client
            .get(url)
            .query(&[
                ("where", serde_json::to_string(query.filters())?),
                ("sort", sort_param(query.sort_order())),
                ("page", query.page().to_string()),
                ("limit", query.page_size().to_string()),
                ("depth", query.depth().to_string()),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::new(format!(
                "querying `{collection}` failed with status {status}"
            )));
        }
        let body: FindResponse = response.json().await?;
        Ok(Page {
            docs: body.docs,
            total_docs: body.total_docs,
            total_pages: body.total_pages,
            page: body.page,
        })
    }

    async fn find_one(&self, collection: &str, query: &Query) -> Result<Option<Map>, Error> {
        let mut query = query.clone();
        query.set_page(1);
        query.set_page_size(1);
        let mut page = self.find(collection, &query).await?;
        Ok(page.docs.pop())
    }

    async fn find_by_id(&self, collection: &str, id: i64) -> Result<Option<Map>, Error> {
        let url = self.endpoint(&["api", collection, &id.to_string()])?;
        let response = self.client.get(url).query(&[("depth", "0")]).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.expect_doc(response).await.map(Some)
    }

    async fn insert(&self, collection: &str, data: Map) -> Result<Map, Error> {
        let url = self.endpoint(&["api", collection])?;
        let response = self.client.post(url).json(&data).send().await?;
        self.expect_doc(response).await
    }

    async fn update(&self, collection: &str, id: i64, updates: Map) -> Result<Map, Error> {
        let url = self.endpoint(&["api", collection, &id.to_string()])?;
        let response = self.client.patch(url).json(&updates).send().await?;
        self.expect_doc(response).await
    }

    async fn find_global(&self, slug: &str, depth: u8) -> Result<Option<Map>, Error> {
        let url = self.endpoint(&["api", "globals", slug])?;
        let response = self
            .client
            .get(url)
            .query(&[("depth", depth.to_string())])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.expect_doc(response).await.map(Some)
    }

    async fn put_global(&self, slug: &str, data: Map) -> Result<(), Error> {
        let url = self.endpoint(&["api", "globals", slug])?;
        let response = self.client.post(url).json(&data).send().await?;
        self.expect_doc(response).await.map(|_| ())
    }
}

/// Serializes the sort order the way the CMS expects: comma-separated
/// fields, descending ones prefixed with `-`.
fn sort_param(sort_order: &[(SharedString, bool)]) -> String {
    let mut param = String::new();
    for (field, descending) in sort_order {
        if !param.is_empty() {
            param.push(',');
        }
        if *descending {
            param.push('-');
        }
        param.push_str(field);
    }
    param
}

#[cfg(test)]
mod tests {
    use super::{HttpStore, sort_param};

    #[test]
    fn it_serializes_sort_orders() {
        assert_eq!(sort_param(&[]), "");
        assert_eq!(sort_param(&[("published_at".into(), true)]), "-published_at");
        assert_eq!(
            sort_param(&[("order".into(), false), ("created_at".into(), true)]),
            "order,-created_at"
        );
    }

    #[test]
    fn it_builds_collection_endpoints() {
        let store = HttpStore::try_new("http://localhost:3000/").unwrap();
        let url = store.endpoint(&["api", "articles", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/articles/7");
    }
}
