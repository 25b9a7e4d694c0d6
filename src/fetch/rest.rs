//! REST Fetch Adapter
//!
//! HTTP GET against `<base>/<endpoint>` with the query string encoding of a
//! descriptor: `_sort` with `-` prefixes for descending fields, 1-indexed
//! `_page`/`_per_page`, the optional free-text filter under its configured
//! field name, and one repeated parameter per column filter.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use super::FetchAdapter;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::query::QueryDescriptor;

/// Fetch adapter for a json-server-style REST resource
pub struct RestAdapter<T> {
    client: reqwest::Client,
    base_url: String,
    endpoint: String,
    global_filter_field: Option<String>,
    _response: PhantomData<fn() -> T>,
}

impl<T> RestAdapter<T> {
    /// Create an adapter for one resource endpoint
    pub fn new(base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            endpoint: endpoint.into(),
            global_filter_field: None,
            _response: PhantomData,
        }
    }

    /// Build an adapter from the configuration surface
    pub fn from_settings(settings: &Settings) -> Self {
        let mut adapter = Self::new(settings.base_url.clone(), settings.endpoint.clone());
        adapter.global_filter_field = settings.global_filter_field.clone();
        adapter
    }

    /// Set the field name the free-text filter is sent under. Without it the
    /// global filter is never emitted.
    pub fn with_global_filter_field(mut self, field: impl Into<String>) -> Self {
        self.global_filter_field = Some(field.into());
        self
    }

    /// Assemble the request URL for a descriptor
    pub fn request_url(&self, query: &QueryDescriptor) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|source| Error::Url {
            url: raw.clone(),
            source,
        })?;

        {
            let mut pairs = url.query_pairs_mut();

            if !query.sorting.is_empty() {
                let sort = query
                    .sorting
                    .iter()
                    .map(|rule| {
                        if rule.descending {
                            format!("-{}", rule.field)
                        } else {
                            rule.field.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                pairs.append_pair("_sort", &sort);
            }

            // The wire protocol is 1-indexed; descriptors are 0-indexed.
            let page = query.page_or_default();
            pairs.append_pair("_page", &(page.index + 1).to_string());
            pairs.append_pair("_per_page", &page.size.to_string());

            if let Some(field) = &self.global_filter_field {
                if !query.global_filter.is_empty() {
                    pairs.append_pair(field, &query.global_filter);
                }
            }

            for filter in &query.column_filters {
                pairs.append_pair(&filter.field, &filter.value);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl<T> FetchAdapter for RestAdapter<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    type Response = T;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, query: &QueryDescriptor) -> Result<T> {
        let url = self.request_url(query)?;
        tracing::debug!(url = %url, "fetching grid data");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Http { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| Error::Body { source })
    }
}
