//! Data service - fetch orchestration over the cache store.
//!
//! Every read goes through [`DataService::resolve`]:
//!
//! 1. a fresh entry is returned as-is, no provider call;
//! 2. otherwise one fetch per key runs at a time and every concurrent
//!    caller awaits that same fetch;
//! 3. a successful fetch replaces the entry, a failed one leaves the store
//!    untouched and the caller gets the last good value (even expired) or
//!    `None` if there never was one.
//!
//! Provider failures never reach callers. They are logged and counted, and
//! show up in [`DataService::source_stats`].

mod status;

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{self, BoxFuture, FutureExt, Shared, join_all};
use tracing::{debug, error, info, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ConfigError, FetchError};
use crate::sentiment::SentimentResult;
use crate::source::{
    CryptoAdapter, CryptoSnapshot, Headlines, HttpFetcher, ImageAdapter, ImageRef, NewsAdapter,
    Payload, SourceAdapter, SourceKey, SourceValue, WeatherAdapter, WeatherLocation,
    WeatherSnapshot,
};
use crate::utils::round_secs;

pub use status::{CacheStatus, SourceCounters, SourceStats};
use status::FetchStats;

/// Outcome of one fetch, shared by every caller that joined it.
type Flight = Shared<BoxFuture<'static, Option<SourceValue>>>;

/// The adapter for each provider-backed source.
#[derive(Debug, Clone)]
pub struct Adapters {
    pub crypto: CryptoAdapter,
    pub weather: WeatherAdapter,
    pub news: NewsAdapter,
    pub images: ImageAdapter,
}

impl Adapters {
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let http = HttpFetcher::new(config.request_timeout, config.max_concurrent_requests)?;

        Ok(Self {
            crypto: CryptoAdapter::new(http.clone(), config.crypto_endpoint.clone()),
            weather: WeatherAdapter::new(
                http,
                config.weather_endpoint.clone(),
                config.weather_location,
            ),
            news: NewsAdapter,
            images: ImageAdapter::new(config.image_endpoint.clone(), config.image_themes.clone()),
        })
    }
}

struct Inner {
    store: CacheStore,
    adapters: Adapters,
    enabled: BTreeSet<SourceKey>,
    in_flight: DashMap<SourceKey, Flight>,
    stats: FetchStats,
}

impl Inner {
    /// Settle a finished fetch: store the value, or fall back to the last
    /// good one.
    fn complete(
        &self,
        key: SourceKey,
        outcome: Result<SourceValue, FetchError>,
    ) -> Option<SourceValue> {
        match outcome {
            Ok(value) => {
                self.store.put(value.clone());
                Some(value)
            }
            Err(err) => {
                warn!("Fetch failed for {}: {}", key, err);
                self.stats.failure(key, &err.to_string());
                self.fallback(key)
            }
        }
    }

    fn fallback(&self, key: SourceKey) -> Option<SourceValue> {
        let stale = self.store.get(key).map(|entry| entry.value);
        if stale.is_some() {
            debug!("Serving stale {} after failed refresh", key);
            self.stats.stale_served(key);
        } else {
            debug!("No data for {}", key);
        }
        stale
    }
}

/// Removes the in-flight marker when the fetch task ends, even by panic.
struct FlightGuard {
    inner: Arc<Inner>,
    key: SourceKey,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.inner.in_flight.remove(&self.key);
    }
}

/// Shared, cached access to every data source.
///
/// Construct one at the application root and clone it into consumers;
/// clones share the same store, in-flight fetches and statistics.
#[derive(Clone)]
pub struct DataService {
    inner: Arc<Inner>,
}

impl DataService {
    pub fn new(
        store: CacheStore,
        adapters: Adapters,
        enabled: impl IntoIterator<Item = SourceKey>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                adapters,
                enabled: enabled.into_iter().collect(),
                in_flight: DashMap::new(),
                stats: FetchStats::default(),
            }),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(
            CacheStore::new(config.freshness.clone()),
            Adapters::from_config(config)?,
            config.enabled.iter().copied(),
        ))
    }

    pub fn store(&self) -> &CacheStore {
        &self.inner.store
    }

    pub fn is_enabled(&self, key: SourceKey) -> bool {
        self.inner.enabled.contains(&key)
    }

    pub fn ensure_enabled(&self, key: SourceKey) -> Result<(), ConfigError> {
        if self.is_enabled(key) {
            Ok(())
        } else {
            Err(ConfigError::SourceDisabled(key))
        }
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = SourceKey> + '_ {
        self.inner.enabled.iter().copied()
    }

    /// Fresh cached value for `T::KEY`, or the outcome of `fetch`.
    ///
    /// `fetch` is only called when no fetch for the key is already running.
    /// Returns `None` only when the fetch failed and nothing was ever cached.
    pub async fn resolve<T, F, Fut>(&self, fetch: F) -> Option<T>
    where
        T: Payload,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let key = T::KEY;

        if let Some(entry) = self.inner.store.get_fresh(key) {
            debug!("Cache hit: {}", key);
            self.inner.stats.hit(key);
            return T::from_value(entry.value);
        }

        self.inner.stats.miss(key);
        let flight = self.join_or_start(key, fetch);
        flight.await.and_then(T::from_value)
    }

    fn join_or_start<T, F, Fut>(&self, key: SourceKey, fetch: F) -> Flight
    where
        T: Payload,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        // The shard stays locked until the flight is registered, so a second
        // caller either sees it or starts none.
        match self.inner.in_flight.entry(key) {
            Entry::Occupied(flight) => {
                debug!("Joining in-flight fetch: {}", key);
                flight.get().clone()
            }
            Entry::Vacant(slot) => {
                // A flight may have finished between the caller's freshness
                // check and taking the slot.
                if let Some(entry) = self.inner.store.get_fresh(key) {
                    debug!("Refreshed while waiting: {}", key);
                    return future::ready(Some(entry.value)).boxed().shared();
                }

                debug!("Cache miss, fetching: {}", key);
                self.inner.stats.fetch(key);

                let pending = fetch();
                let inner = Arc::clone(&self.inner);
                // Spawned so the fetch finishes and fills the cache even if
                // every caller goes away.
                let task = tokio::spawn(async move {
                    let _guard = FlightGuard {
                        inner: Arc::clone(&inner),
                        key,
                    };
                    let outcome = pending.await.map(Payload::into_value);
                    inner.complete(key, outcome)
                });

                let inner = Arc::clone(&self.inner);
                let flight = async move {
                    match task.await {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            error!("Fetch task for {} aborted: {}", key, err);
                            inner.stats.failure(key, &err.to_string());
                            inner.fallback(key)
                        }
                    }
                }
                .boxed()
                .shared();

                slot.insert(flight.clone());
                flight
            }
        }
    }

    /// Resolve through an adapter. `None` without fetching if the source is
    /// disabled.
    pub async fn resolve_adapter<A>(&self, adapter: &A) -> Option<A::Output>
    where
        A: SourceAdapter + Clone,
    {
        let key = <A::Output as Payload>::KEY;
        if !self.is_enabled(key) {
            debug!("Skipping disabled source {}", key);
            return None;
        }

        let adapter = adapter.clone();
        self.resolve(move || async move { adapter.fetch().await }).await
    }

    pub async fn crypto(&self) -> Option<CryptoSnapshot> {
        self.resolve_adapter(&self.inner.adapters.crypto).await
    }

    /// Weather at the configured default location.
    pub async fn weather(&self) -> Option<WeatherSnapshot> {
        self.resolve_adapter(&self.inner.adapters.weather).await
    }

    /// Weather at `location`. All locations share one cache entry, so a
    /// fresh value for another location is returned as-is.
    pub async fn weather_at(&self, location: WeatherLocation) -> Option<WeatherSnapshot> {
        self.resolve_adapter(&self.inner.adapters.weather.at(location)).await
    }

    pub async fn news(&self) -> Option<Headlines> {
        self.resolve_adapter(&self.inner.adapters.news).await
    }

    pub async fn image(&self) -> Option<ImageRef> {
        self.resolve_adapter(&self.inner.adapters.images).await
    }

    /// Market sentiment, cached under its own key.
    ///
    /// Falls back to a neutral reading when no crypto data is available or
    /// the sentiment source is disabled.
    pub async fn sentiment(&self) -> SentimentResult {
        if !self.is_enabled(SourceKey::Sentiment) {
            return SentimentResult::neutral();
        }

        let service = self.clone();
        self.resolve(move || async move { Ok::<_, FetchError>(service.compute_sentiment().await) })
            .await
            .unwrap_or_else(SentimentResult::neutral)
    }

    async fn compute_sentiment(&self) -> SentimentResult {
        match self.crypto().await {
            Some(snapshot) => SentimentResult::from_snapshot(&snapshot),
            None => SentimentResult::neutral(),
        }
    }

    /// Resolve a source selected by name.
    pub async fn resolve_key(&self, key: SourceKey) -> Result<Option<SourceValue>, ConfigError> {
        self.ensure_enabled(key)?;

        let value = match key {
            SourceKey::Crypto => self.crypto().await.map(Payload::into_value),
            SourceKey::Weather => self.weather().await.map(Payload::into_value),
            SourceKey::News => self.news().await.map(Payload::into_value),
            SourceKey::Images => self.image().await.map(Payload::into_value),
            SourceKey::Sentiment => Some(self.sentiment().await.into_value()),
        };
        Ok(value)
    }

    /// Resolve every enabled source concurrently.
    pub async fn refresh_all(&self) {
        let keys: Vec<SourceKey> = self.enabled_sources().collect();
        let results = join_all(keys.iter().map(|key| self.resolve_key(*key))).await;

        let available = results
            .iter()
            .filter(|r| matches!(r, Ok(Some(_))))
            .count();
        info!("Refreshed {}/{} sources", available, keys.len());
    }

    /// Drop all cached values and fetch everything again.
    pub async fn reset(&self) {
        info!("Cache reset requested");
        self.inner.store.clear();
        self.refresh_all().await;
    }

    /// Age, expiry and value of every cached source.
    pub fn cache_status(&self) -> Vec<CacheStatus> {
        let store = &self.inner.store;

        store
            .entries()
            .into_iter()
            .map(|(key, entry)| {
                let age = entry.age();
                let window = store.window(key);
                let age_secs = round_secs(age);
                CacheStatus {
                    source: key,
                    age_secs,
                    age: format!("{}s", age_secs),
                    expired: !store.policy().is_fresh(key, age),
                    window_secs: window.as_secs(),
                    fetched_at: entry.fetched_at_utc,
                    value: entry.value,
                    counters: self.inner.stats.get(key),
                }
            })
            .collect()
    }

    /// Hit, miss and failure counters for every source.
    pub fn source_stats(&self) -> Vec<SourceStats> {
        SourceKey::ALL
            .into_iter()
            .map(|key| {
                let counters = self.inner.stats.get(key);
                SourceStats {
                    source: key,
                    enabled: self.is_enabled(key),
                    hit_rate: counters.hit_rate(),
                    counters,
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for DataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataService")
            .field("store", &self.inner.store)
            .field("enabled", &self.inner.enabled)
            .field("in_flight", &self.inner.in_flight.len())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::cache::FreshnessPolicy;
    use crate::sentiment::SentimentBand;
    use crate::source::CoinQuote;

    fn service_with(policy: FreshnessPolicy, enabled: &[SourceKey]) -> DataService {
        let adapters = Adapters::from_config(&Config::default()).unwrap();
        DataService::new(CacheStore::new(policy), adapters, enabled.iter().copied())
    }

    fn service() -> DataService {
        service_with(
            FreshnessPolicy::uniform(Duration::from_secs(30)),
            &SourceKey::ALL,
        )
    }

    fn headlines(text: &str) -> Headlines {
        Headlines(vec![text.to_string()])
    }

    /// Resolve news through a counting fetch that waits `delay` before
    /// answering with `result`.
    async fn fetch_news(
        service: &DataService,
        calls: &Arc<AtomicUsize>,
        delay: Duration,
        result: Result<Headlines, FetchError>,
    ) -> Option<Headlines> {
        let calls = Arc::clone(calls);
        service
            .resolve(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::time::sleep(delay).await;
                    result
                }
            })
            .await
    }

    fn crypto(btc_change: f64, eth_change: f64) -> CryptoSnapshot {
        CryptoSnapshot {
            btc: CoinQuote {
                price: 64_000.0,
                change_24h: Some(btc_change),
            },
            eth: CoinQuote {
                price: 3_100.0,
                change_24h: Some(eth_change),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_value_is_not_refetched() {
        let service = service();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = fetch_news(&service, &calls, Duration::ZERO, Ok(headlines("a"))).await;
        assert_eq!(first, Some(headlines("a")));

        tokio::time::advance(Duration::from_secs(10)).await;
        let second = fetch_news(&service, &calls, Duration::ZERO, Ok(headlines("b"))).await;

        assert_eq!(second, Some(headlines("a")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = service.inner.stats.get(SourceKey::News);
        assert_eq!((stats.hits, stats.misses, stats.fetches), (1, 1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_value_is_refetched() {
        let service = service();
        let calls = Arc::new(AtomicUsize::new(0));

        fetch_news(&service, &calls, Duration::ZERO, Ok(headlines("a"))).await;
        tokio::time::advance(Duration::from_secs(31)).await;
        let value = fetch_news(&service, &calls, Duration::ZERO, Ok(headlines("b"))).await;

        assert_eq!(value, Some(headlines("b")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(service.store().is_fresh(SourceKey::News));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_serves_stale_value() {
        let service = service();
        let calls = Arc::new(AtomicUsize::new(0));

        fetch_news(&service, &calls, Duration::ZERO, Ok(headlines("a"))).await;
        tokio::time::advance(Duration::from_secs(45)).await;

        let failure = Err(FetchError::Timeout(5000));
        let value = fetch_news(&service, &calls, Duration::ZERO, failure).await;
        assert_eq!(value, Some(headlines("a")));

        // The failure did not touch the stored entry
        let entry = service.store().get(SourceKey::News).unwrap();
        assert_eq!(entry.age(), Duration::from_secs(45));
        assert!(!service.store().is_fresh(SourceKey::News));

        let stats = service.inner.stats.get(SourceKey::News);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.stale_served, 1);
        assert_eq!(stats.last_error.as_deref(), Some("request timed out after 5000ms"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cold_failure_returns_none() {
        let service = service();
        let calls = Arc::new(AtomicUsize::new(0));

        let value = fetch_news(
            &service,
            &calls,
            Duration::ZERO,
            Err(FetchError::malformed("missing articles")),
        )
        .await;

        assert_eq!(value, None);
        assert!(service.store().get(SourceKey::News).is_none());
        assert!(service.cache_status().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_fetch() {
        let service = service();
        let calls = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(200);

        let (a, b, c) = tokio::join!(
            fetch_news(&service, &calls, delay, Ok(headlines("a"))),
            fetch_news(&service, &calls, delay, Ok(headlines("b"))),
            fetch_news(&service, &calls, delay, Ok(headlines("c"))),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a, Some(headlines("a")));
        assert_eq!(b, a);
        assert_eq!(c, a);
        assert!(service.inner.in_flight.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_fetch_still_fills_cache() {
        let service = service();
        let calls = Arc::new(AtomicUsize::new(0));

        let abandoned = tokio::time::timeout(
            Duration::from_millis(10),
            fetch_news(&service, &calls, Duration::from_millis(100), Ok(headlines("late"))),
        )
        .await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;

        let entry = service.store().get(SourceKey::News).unwrap();
        assert_eq!(entry.value, SourceValue::News(headlines("late")));
        assert!(service.inner.in_flight.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_fetch_falls_back() {
        let service = service();
        service.store().put(headlines("old").into_value());
        tokio::time::advance(Duration::from_secs(60)).await;

        async fn explode() -> Result<Headlines, FetchError> {
            panic!("provider exploded")
        }
        let value = service.resolve(explode).await;

        assert_eq!(value, Some(headlines("old")));
        assert!(service.inner.in_flight.is_empty());
        assert_eq!(service.inner.stats.get(SourceKey::News).failures, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentiment_from_cached_crypto() {
        let service = service();
        // btc 10 * 2 = 20, eth 4 * 1.5 = 6, (20 + 6) / 2 * 5 = 65
        service.store().put(crypto(10.0, 4.0).into_value());

        let sentiment = service.sentiment().await;
        assert_eq!(sentiment.score, 65.0);
        assert_eq!(sentiment.band, SentimentBand::VeryBullish);
        assert!(service.store().is_fresh(SourceKey::Sentiment));

        // Cached: a new crypto value does not move it until the window ends
        service.store().put(crypto(-10.0, -10.0).into_value());
        assert_eq!(service.sentiment().await.score, 65.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentiment_neutral_without_crypto() {
        let service = service_with(
            FreshnessPolicy::default(),
            &[SourceKey::News, SourceKey::Sentiment],
        );

        let sentiment = service.sentiment().await;
        assert_eq!(sentiment, SentimentResult::neutral());
        assert_eq!(service.inner.stats.get(SourceKey::Crypto).fetches, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_source() {
        let service = service_with(FreshnessPolicy::default(), &[SourceKey::News]);

        let err = service.resolve_key(SourceKey::Crypto).await.unwrap_err();
        assert!(matches!(err, ConfigError::SourceDisabled(SourceKey::Crypto)));
        assert_eq!(service.crypto().await, None);
        assert_eq!(service.sentiment().await, SentimentResult::neutral());

        let stats = service.source_stats();
        assert_eq!(stats.len(), SourceKey::ALL.len());
        assert!(stats.iter().all(|s| s.enabled == (s.source == SourceKey::News)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_and_refetches() {
        let service = service_with(FreshnessPolicy::default(), &[SourceKey::News]);
        service.store().put(headlines("stale").into_value());
        service.store().put(crypto(1.0, 1.0).into_value());

        service.reset().await;

        let status = service.cache_status();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].source, SourceKey::News);
        assert_eq!(status[0].age_secs, 0);
        assert_ne!(status[0].value, SourceValue::News(headlines("stale")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_status() {
        let service = service_with(FreshnessPolicy::default(), &SourceKey::ALL);
        service.store().put(headlines("a").into_value());

        tokio::time::advance(Duration::from_millis(12_400)).await;
        let status = service.cache_status();
        assert_eq!(status[0].age_secs, 12);
        assert_eq!(status[0].age, "12s");
        assert_eq!(status[0].window_secs, 600);
        assert!(!status[0].expired);
        assert_eq!(status[0].counters.misses, 0);

        tokio::time::advance(Duration::from_secs(600)).await;
        assert!(service.cache_status()[0].expired);
    }

    #[tokio::test]
    async fn test_provider_error_is_absorbed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .expect(2)
            .create_async()
            .await;

        let config = Config {
            crypto_endpoint: url::Url::parse(&format!("{}/simple/price", server.url())).unwrap(),
            ..Config::default()
        };
        let service = DataService::from_config(&config).unwrap();

        assert_eq!(service.crypto().await, None);
        assert_eq!(service.resolve_key(SourceKey::Crypto).await.unwrap(), None);
        mock.assert_async().await;

        let stats = &service.source_stats()[0];
        assert_eq!(stats.source, SourceKey::Crypto);
        assert_eq!(stats.counters.failures, 2);
        assert_eq!(
            stats.counters.last_error.as_deref(),
            Some("provider returned 502 Bad Gateway")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_taken_after_refresh_does_not_refetch() {
        let service = service();
        service.store().put(headlines("landed").into_value());
        let calls = Arc::new(AtomicUsize::new(0));

        let counted = Arc::clone(&calls);
        let flight = service.join_or_start(SourceKey::News, move || {
            counted.fetch_add(1, Ordering::SeqCst);
            async { Ok(headlines("duplicate")) }
        });

        assert_eq!(flight.await, Some(SourceValue::News(headlines("landed"))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(service.inner.in_flight.is_empty());
        assert_eq!(service.inner.stats.get(SourceKey::News).fetches, 0);
    }

    #[tokio::test]
    async fn test_deadline_overrun_serves_stale_value() {
        // Accepts connections through the backlog but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/simple/price", listener.local_addr().unwrap());
        let config = Config {
            crypto_endpoint: url::Url::parse(&endpoint).unwrap(),
            request_timeout: Duration::from_millis(100),
            ..Config::default()
        };
        let service = DataService::new(
            CacheStore::new(
                FreshnessPolicy::default()
                    .with_window(SourceKey::Crypto, Duration::from_millis(20)),
            ),
            Adapters::from_config(&config).unwrap(),
            SourceKey::ALL,
        );

        let last_good = crypto(2.0, 1.0);
        service.store().put(last_good.clone().into_value());
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(service.crypto().await, Some(last_good));

        let stats = service.inner.stats.get(SourceKey::Crypto);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.stale_served, 1);
        assert_eq!(stats.last_error.as_deref(), Some("request timed out after 100ms"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_stats_report_hit_rate() {
        let service = service();
        let calls = Arc::new(AtomicUsize::new(0));
        for _ in 0..4 {
            fetch_news(&service, &calls, Duration::ZERO, Ok(headlines("a"))).await;
        }

        let stats = service.source_stats();
        let news = stats.iter().find(|s| s.source == SourceKey::News).unwrap();
        assert_eq!(news.hit_rate, 0.75);

        let json = serde_json::to_value(news).unwrap();
        assert_eq!(json["hit_rate"], 0.75);
        assert_eq!(json["hits"], 3);
    }
}
