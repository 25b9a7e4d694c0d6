//! REST Data Provider
//!
//! Cache-backed provider for the json-server envelope: binds one REST
//! adapter configuration, forwards fetches through an owned (or injected)
//! request cache, and interprets the envelope for the grid.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{DataProvider, PaginatedResponse};
use crate::cache::{CachedResponse, PendingFetch, RequestCache};
use crate::config::Settings;
use crate::fetch::RestAdapter;
use crate::query::QueryDescriptor;

/// Provider over one REST resource endpoint, polymorphic over the row type
pub struct RestProvider<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    cache: Arc<RequestCache<RestAdapter<PaginatedResponse<T>>>>,
}

impl<T> RestProvider<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a provider with its own cache, configured from the settings
    /// surface
    pub fn new(settings: &Settings) -> Self {
        let adapter = RestAdapter::from_settings(settings);
        Self {
            cache: Arc::new(RequestCache::new(adapter)),
        }
    }

    /// Create a provider over an explicitly injected (possibly shared) cache
    pub fn with_cache(cache: Arc<RequestCache<RestAdapter<PaginatedResponse<T>>>>) -> Self {
        Self { cache }
    }

    /// The cache this provider fetches through
    pub fn cache(&self) -> &Arc<RequestCache<RestAdapter<PaginatedResponse<T>>>> {
        &self.cache
    }

    /// Warm the first page (or a partial query defaulted onto it); await the
    /// returned fetch once at startup, before the grid mounts.
    pub fn prefetch_initial_data(
        &self,
        partial: QueryDescriptor,
    ) -> PendingFetch<PaginatedResponse<T>> {
        self.cache.prefetch_initial_data(partial)
    }
}

#[async_trait]
impl<T> DataProvider for RestProvider<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Row = T;
    type Response = PaginatedResponse<T>;

    async fn fetch_data(&self, query: &QueryDescriptor) -> CachedResponse<Self::Response> {
        self.cache.fetch_data(query).await
    }

    fn rows(&self, response: &Self::Response) -> Vec<T> {
        response.data.clone()
    }

    fn row_count(&self, response: &Self::Response) -> u64 {
        response.items
    }

    fn page_count(&self, response: &Self::Response) -> u32 {
        response.pages
    }

    fn initial_data(&self) -> Self::Response {
        PaginatedResponse::default()
    }

    fn prefetch_adjacent_pages(&self, query: &QueryDescriptor) {
        self.cache.prefetch_adjacent_pages(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::fetch::FetchAdapter;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, Deserialize)]
    struct Product {
        #[allow(dead_code)]
        id: u32,
        name: String,
    }

    fn provider() -> RestProvider<Product> {
        let settings = Settings {
            endpoint: "products".into(),
            ..Settings::default()
        };
        RestProvider::new(&settings)
    }

    #[test]
    fn test_initial_data_is_empty_before_any_fetch() {
        let provider = provider();
        let initial = provider.initial_data();

        assert!(provider.rows(&initial).is_empty());
        assert_eq!(provider.row_count(&initial), 0);
        assert_eq!(provider.page_count(&initial), 0);
        assert!(provider.cache().is_empty());
    }

    #[test]
    fn test_envelope_accessors() {
        let provider = provider();
        let response = PaginatedResponse {
            pages: 3,
            items: 25,
            data: vec![
                Product {
                    id: 1,
                    name: "drill".into(),
                },
                Product {
                    id: 2,
                    name: "saw".into(),
                },
            ],
            ..PaginatedResponse::default()
        };

        let rows = provider.rows(&response);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "saw");
        assert_eq!(provider.row_count(&response), 25);
        assert_eq!(provider.page_count(&response), 3);
    }

    // The generic profile: a caller-defined envelope behind its own provider.

    #[derive(Clone, Debug, Default)]
    struct NameList {
        total: u64,
        page_total: u32,
        names: Vec<String>,
    }

    struct NameAdapter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FetchAdapter for NameAdapter {
        type Response = NameList;

        fn endpoint(&self) -> &str {
            "names"
        }

        async fn fetch(&self, _query: &QueryDescriptor) -> Result<NameList> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(NameList {
                total: 2,
                page_total: 1,
                names: vec!["ada".into(), "grace".into()],
            })
        }
    }

    struct NameProvider {
        cache: Arc<RequestCache<NameAdapter>>,
    }

    #[async_trait]
    impl DataProvider for NameProvider {
        type Row = String;
        type Response = NameList;

        async fn fetch_data(&self, query: &QueryDescriptor) -> CachedResponse<NameList> {
            self.cache.fetch_data(query).await
        }

        fn rows(&self, response: &NameList) -> Vec<String> {
            response.names.clone()
        }

        fn row_count(&self, response: &NameList) -> u64 {
            response.total
        }

        fn page_count(&self, response: &NameList) -> u32 {
            response.page_total
        }

        fn initial_data(&self) -> NameList {
            NameList::default()
        }
    }

    #[tokio::test]
    async fn test_custom_envelope_provider_fetches_through_its_cache() {
        let provider = NameProvider {
            cache: Arc::new(RequestCache::new(NameAdapter {
                calls: AtomicUsize::new(0),
            })),
        };
        let query = QueryDescriptor::new();

        let response = provider
            .fetch_data(&query)
            .await
            .expect("fetch should succeed");
        assert_eq!(provider.rows(&response), vec!["ada", "grace"]);
        assert_eq!(provider.row_count(&response), 2);

        provider
            .fetch_data(&query)
            .await
            .expect("fetch should succeed");
        assert_eq!(provider.cache.adapter().calls.load(Ordering::SeqCst), 1);

        // Default prefetch is a no-op for providers that opt out.
        provider.prefetch_adjacent_pages(&query);
        assert_eq!(provider.cache.len(), 1);
    }
}
