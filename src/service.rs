//! Menu lookup service
//!
//! Ties the resolvers, the cache and the remote source together: resolve the day and
//! restaurant, probe the cache, and only go to the network for the current week.

use chrono::NaiveDate;
use thiserror::Error;

use crate::cache::CacheManager;
use crate::data::{parse_menu, resolve_restaurant, MenuEntrySet, MenuError, MenuSource, RestaurantId};
use crate::date::{resolve_day, DateError};
use crate::week::{cache_key, is_current_week};

/// Reasons a menu lookup can fail
#[derive(Debug, Error)]
pub enum FetchError {
    /// The day expression could not be parsed
    #[error(transparent)]
    InvalidDate(#[from] DateError),

    /// The week is not cached and the remote source only serves the current week
    #[error("Unable to fetch menu for the requested date ({date}).")]
    StaleRequestUnavailable { date: NaiveDate },

    /// The remote call succeeded but no valid record was found
    #[error("Failed to fetch menu for the requested restaurant (id {restaurant}).")]
    RemoteFetchEmpty { restaurant: RestaurantId },

    /// The remote call itself failed
    #[error(transparent)]
    Remote(#[from] MenuError),
}

/// Where a served menu came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrigin {
    Cache,
    Remote,
}

/// A successfully resolved request
#[derive(Debug, Clone)]
pub struct MenuResolution {
    /// The whole week's entries for the restaurant
    pub entries: MenuEntrySet,
    /// The date the request resolved to
    pub date: NaiveDate,
    /// The restaurant the request resolved to
    pub restaurant: RestaurantId,
    /// Whether the entries were cached or freshly fetched
    pub origin: MenuOrigin,
}

/// Resolves requests to weekly menus, fetching each week at most once
#[derive(Debug)]
pub struct MenuService<S> {
    source: S,
    cache: Option<CacheManager>,
    today: NaiveDate,
}

impl<S: MenuSource> MenuService<S> {
    /// Creates a service for requests made on `today`
    ///
    /// `today` anchors relative day expressions and decides which week is current.
    /// Without a cache every request for the current week goes to the remote source
    /// and every other week is unavailable.
    pub fn new(source: S, cache: Option<CacheManager>, today: NaiveDate) -> Self {
        Self {
            source,
            cache,
            today,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves free-text day and restaurant inputs to a week's menu
    ///
    /// # Returns
    /// * `Ok(MenuResolution)` with the entries, the resolved date and restaurant
    /// * `Err(FetchError)` if the date is invalid, the week is unavailable or the
    ///   remote fetch failed or came back empty
    pub async fn resolve(&self, day: &str, restaurant: &str) -> Result<MenuResolution, FetchError> {
        let date = resolve_day(day, self.today)?;
        let restaurant = resolve_restaurant(restaurant);
        tracing::debug!(%date, restaurant, "request resolved");

        let (entries, origin) = self.fetch_menu(date, restaurant).await?;
        Ok(MenuResolution {
            entries,
            date,
            restaurant,
            origin,
        })
    }

    /// Returns the menu for the week containing `date`
    ///
    /// # Behavior
    /// - Cached weeks are served without touching the network
    /// - A missing week other than the current one is `StaleRequestUnavailable`
    /// - A missing current week is fetched; a non-empty result is cached
    /// - Nothing is written to the cache when the fetch fails or is empty
    pub async fn fetch_menu(
        &self,
        date: NaiveDate,
        restaurant: RestaurantId,
    ) -> Result<(MenuEntrySet, MenuOrigin), FetchError> {
        let key = cache_key(date, restaurant);

        if let Some(ref cache) = self.cache {
            if let Some(entries) = cache.load(&key) {
                return Ok((entries, MenuOrigin::Cache));
            }
        }

        if !is_current_week(date, self.today) {
            return Err(FetchError::StaleRequestUnavailable { date });
        }

        let raw = self.source.fetch_raw(restaurant).await?;
        let entries = parse_menu(&raw);
        if entries.is_empty() {
            return Err(FetchError::RemoteFetchEmpty { restaurant });
        }

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.store(&key, &entries) {
                tracing::warn!(key = %key, error = %e, "failed to write menu cache");
            }
        }

        Ok((entries, MenuOrigin::Remote))
    }
}
