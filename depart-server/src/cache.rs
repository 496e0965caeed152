//! Caching layer for maps API responses.
//!
//! The departure search fires several point-duration probes per request,
//! and the upstream is rate limited. Point durations are cached keyed by
//! (mode, rounded endpoints, 5-minute departure bucket); geocoding results
//! are cached by query string. Timetable plans are not cached: they are
//! one call per request and sensitive to the exact deadline.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Coordinates, Instant, Mode};
use crate::maps::{MapsClient, MapsError, TransitLeg};
use crate::planner::TrafficModel;

/// Cache key for point durations: mode, endpoint microdegrees, time bucket.
type RouteKey = (Mode, (i64, i64), (i64, i64), i64);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,

    /// Departure time bucket size in minutes.
    pub bucket_mins: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(120),
            max_capacity: 2000,
            bucket_mins: 5,
        }
    }
}

/// Maps client with caching.
pub struct CachedMapsClient {
    client: MapsClient,
    durations: MokaCache<RouteKey, u32>,
    geocodes: MokaCache<String, Coordinates>,
    bucket_mins: i64,
}

impl CachedMapsClient {
    /// Create a new cached client.
    pub fn new(client: MapsClient, config: &CacheConfig) -> Self {
        let durations = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        // Geocodes are stable; keep them longer.
        let geocodes = MokaCache::builder()
            .time_to_live(Duration::from_secs(24 * 60 * 60))
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            durations,
            geocodes,
            bucket_mins: config.bucket_mins,
        }
    }

    fn route_key(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        departure: Instant,
    ) -> RouteKey {
        let bucket = departure.unix_seconds().div_euclid(self.bucket_mins * 60);
        (
            mode,
            origin.microdegrees(),
            destination.microdegrees(),
            bucket,
        )
    }

    /// Point duration, from cache if fresh.
    ///
    /// Only successful responses are cached; failures are retried on the
    /// next call.
    pub async fn route_duration(
        &self,
        mode: Mode,
        origin: Coordinates,
        destination: Coordinates,
        departure: Instant,
        traffic: TrafficModel,
    ) -> Result<u32, MapsError> {
        let key = self.route_key(mode, origin, destination, departure);

        if let Some(secs) = self.durations.get(&key).await {
            return Ok(secs);
        }

        let secs = self
            .client
            .route_duration(mode, origin, destination, departure, traffic)
            .await?;

        self.durations.insert(key, secs).await;
        Ok(secs)
    }

    /// Timetable plan, always fetched fresh.
    pub async fn transit_route_arriving_by(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        arrival: Instant,
    ) -> Result<TransitLeg, MapsError> {
        self.client
            .transit_route_arriving_by(origin, destination, arrival)
            .await
    }

    /// Geocode a query, from cache if seen before.
    pub async fn geocode(&self, query: &str) -> Result<Coordinates, MapsError> {
        let normalized = query.trim().to_lowercase();

        if let Some(coords) = self.geocodes.get(&normalized).await {
            return Ok(coords);
        }

        let coords = self.client.geocode(query).await?;
        self.geocodes.insert(normalized, coords).await;
        Ok(coords)
    }

    /// Number of cached duration entries (for monitoring).
    pub fn duration_entry_count(&self) -> u64 {
        self.durations.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MapsConfig;

    fn cached_client() -> CachedMapsClient {
        let client = MapsClient::new(MapsConfig::new("test-key")).unwrap();
        CachedMapsClient::new(client, &CacheConfig::default())
    }

    #[test]
    fn departures_in_same_bucket_share_a_key() {
        let cached = cached_client();
        let origin = Coordinates::new(47.61, -122.33).unwrap();
        let destination = Coordinates::new(47.44, -122.30).unwrap();

        let a = cached.route_key(
            Mode::Driving,
            origin,
            destination,
            Instant::from_unix_seconds(1_700_000_000),
        );
        let b = cached.route_key(
            Mode::Driving,
            origin,
            destination,
            Instant::from_unix_seconds(1_700_000_000 + 120),
        );

        assert_eq!(a, b);
    }

    #[test]
    fn distinct_modes_and_buckets_do_not_collide() {
        let cached = cached_client();
        let origin = Coordinates::new(47.61, -122.33).unwrap();
        let destination = Coordinates::new(47.44, -122.30).unwrap();
        let t = Instant::from_unix_seconds(1_700_000_000);

        let driving = cached.route_key(Mode::Driving, origin, destination, t);
        let walking = cached.route_key(Mode::Walking, origin, destination, t);
        assert_ne!(driving, walking);

        let next_bucket = cached.route_key(
            Mode::Driving,
            origin,
            destination,
            t.add_seconds(10 * 60),
        );
        assert_ne!(driving, next_bucket);
    }
}
