use std::time::Duration;

use reqwest::Client;

use crate::error::SourceError;
use crate::http::{build_client, send_json};
use crate::price_types::{CardsResponse, PriceTrackerCard};

/// Maximum number of pages fetched for one set. Guards against an API
/// that keeps reporting `hasMore`.
const MAX_PAGES: usize = 100;

const HISTORY_DAYS: u32 = 365;

/// Client for the price tracker's `/cards` endpoint (bearer-token auth).
pub struct PriceTrackerClient {
    client: Client,
    base_url: String,
    api_key: String,
    page_delay: Duration,
}

impl PriceTrackerClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            page_delay: Duration::from_millis(500),
        })
    }

    /// Pause between page requests. Defaults to 500ms.
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    fn cards_url(&self) -> String {
        format!("{}/cards", self.base_url)
    }

    /// One page of cards. The first request of a set must not carry an
    /// offset: the API switches to small pages once one is present.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Unauthorized`] for HTTP 401/403 (bad API key).
    /// - [`SourceError::NotFound`] for HTTP 404.
    /// - [`SourceError::UnexpectedStatus`] for other non-2xx statuses.
    /// - [`SourceError::Http`] on network failure.
    /// - [`SourceError::Deserialize`] if the body does not match.
    pub async fn fetch_cards_page(
        &self,
        set_id: &str,
        offset: Option<u64>,
    ) -> Result<CardsResponse, SourceError> {
        let url = self.cards_url();
        let days = HISTORY_DAYS.to_string();
        let mut query: Vec<(&str, String)> = vec![
            ("language", "english".to_owned()),
            ("setId", set_id.to_owned()),
            ("includeHistory", "true".to_owned()),
            ("includeEbay", "true".to_owned()),
            ("includeBoth", "true".to_owned()),
            ("days", days),
            ("fetchAllInSet", "true".to_owned()),
        ];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let request = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&query);

        send_json(request, &url, &format!("cards of set {set_id}")).await
    }

    /// Every card of a set, following `metadata.hasMore` with
    /// `offset += count`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_cards_page`]. Returns
    /// [`SourceError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn fetch_set_cards(&self, set_id: &str) -> Result<Vec<PriceTrackerCard>, SourceError> {
        let mut cards: Vec<PriceTrackerCard> = Vec::new();
        let mut offset: Option<u64> = None;

        for page in 1..=MAX_PAGES {
            if page > 1 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let response = self.fetch_cards_page(set_id, offset).await?;
            let metadata = response.metadata.unwrap_or_default();
            let fetched = response.data.len() as u64;
            cards.extend(response.data);

            tracing::debug!(
                set_id,
                page,
                fetched,
                total_so_far = cards.len(),
                total = ?metadata.total,
                "fetched price tracker page"
            );

            if !metadata.has_more {
                return Ok(cards);
            }

            let count = metadata.count.unwrap_or(fetched);
            if count == 0 {
                // hasMore without progress would loop forever.
                tracing::warn!(set_id, "price tracker reported more pages but returned none");
                return Ok(cards);
            }
            offset = Some(offset.unwrap_or(0) + count);
        }

        Err(SourceError::PaginationLimit {
            set_id: set_id.to_owned(),
            max_pages: MAX_PAGES,
        })
    }
}
