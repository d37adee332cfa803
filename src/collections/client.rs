//! Collection client

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{PageSource, Paginator};
use crate::retry::RetryPolicy;
use crate::types::{Collection, Record};
use tracing::{debug, info};
use url::Url;

/// Parse an API base URL, making sure collection paths join beneath it
pub fn parse_base_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_value("base_url", format!("'{base}' cannot be a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Endpoint of `collection` under `base`
pub fn collection_endpoint(base: &Url, collection: Collection) -> Result<Url> {
    Ok(base.join(collection.path())?)
}

/// Outcome of fetching all three collections side by side.
///
/// Each collection succeeds or fails on its own.
#[derive(Debug)]
pub struct CollectionResults {
    pub characters: Result<Vec<Record>>,
    pub locations: Result<Vec<Record>>,
    pub episodes: Result<Vec<Record>>,
}

impl CollectionResults {
    /// Number of collections that failed
    pub fn failures(&self) -> usize {
        [&self.characters, &self.locations, &self.episodes]
            .iter()
            .filter(|r| r.is_err())
            .count()
    }

    /// Pair each result with its collection
    pub fn by_collection(self) -> impl Iterator<Item = (Collection, Result<Vec<Record>>)> {
        [
            (Collection::Characters, self.characters),
            (Collection::Locations, self.locations),
            (Collection::Episodes, self.episodes),
        ]
        .into_iter()
    }
}

/// Fetches whole collections from the API
#[derive(Debug)]
pub struct CollectionClient<S = HttpClient> {
    paginator: Paginator<S>,
    base_url: Url,
}

impl CollectionClient<HttpClient> {
    /// Build a client backed by a fresh HTTP connection pool
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let retry = config.retry_policy();
        let http = HttpClient::with_config(config)?;
        Ok(Self::with_source(http, base_url, retry))
    }
}

impl<S: PageSource> CollectionClient<S> {
    /// Build a client over any page source
    pub fn with_source(source: S, base_url: Url, retry: RetryPolicy) -> Self {
        Self {
            paginator: Paginator::new(source, retry),
            base_url,
        }
    }

    /// API base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch every record of one collection
    pub async fn fetch_all(&self, collection: Collection) -> Result<Vec<Record>> {
        let endpoint = collection_endpoint(&self.base_url, collection)?;
        let records = self.paginator.fetch_all_pages(&endpoint).await?;
        info!("Fetched {} {collection}", records.len());
        Ok(records)
    }

    pub async fn fetch_all_characters(&self) -> Result<Vec<Record>> {
        self.fetch_all(Collection::Characters).await
    }

    pub async fn fetch_all_locations(&self) -> Result<Vec<Record>> {
        self.fetch_all(Collection::Locations).await
    }

    pub async fn fetch_all_episodes(&self) -> Result<Vec<Record>> {
        self.fetch_all(Collection::Episodes).await
    }

    /// Fetch all three collections concurrently. A failure in one does not
    /// stop the others.
    pub async fn fetch_every_collection(&self) -> CollectionResults {
        let (characters, locations, episodes) = tokio::join!(
            self.fetch_all_characters(),
            self.fetch_all_locations(),
            self.fetch_all_episodes(),
        );
        CollectionResults {
            characters,
            locations,
            episodes,
        }
    }

    /// Release the connection pool.
    ///
    /// Takes the client by value, so it can only run once and only after
    /// every fetch borrowing it has finished.
    pub fn close(self) {
        debug!("Closing collection client for {}", self.base_url);
        drop(self.paginator.into_source());
    }
}
