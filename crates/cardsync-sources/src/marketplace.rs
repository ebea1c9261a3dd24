//! Client for the marketplace catalog mirror (`tcgcsv`-style layout:
//! `/tcgplayer/{category}/groups` and `/tcgplayer/{category}/{group}/products`).

use reqwest::Client;
use serde::{Deserialize, Serialize};

use cardsync_core::MarketplaceProduct;

use crate::error::SourceError;
use crate::http::{build_client, send_json};

/// A marketplace group, which corresponds to one printed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceGroup {
    #[serde(rename = "groupId")]
    pub group_id: i64,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(rename = "publishedOn", default)]
    pub published_on: Option<String>,
}

/// List endpoints answer either `{"results": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Wrapped { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { results } | Self::Bare(results) => results,
        }
    }
}

pub struct MarketplaceClient {
    client: Client,
    base_url: String,
    category_id: u32,
}

impl MarketplaceClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        category_id: u32,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            category_id,
        })
    }

    fn groups_url(&self) -> String {
        format!("{}/tcgplayer/{}/groups", self.base_url, self.category_id)
    }

    fn products_url(&self, group_id: i64) -> String {
        format!(
            "{}/tcgplayer/{}/{group_id}/products",
            self.base_url, self.category_id
        )
    }

    /// Every group of the configured category.
    ///
    /// # Errors
    ///
    /// - [`SourceError::NotFound`] for HTTP 404.
    /// - [`SourceError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`SourceError::Http`] on network failure.
    /// - [`SourceError::Deserialize`] if the body is neither shape of list.
    pub async fn fetch_groups(&self) -> Result<Vec<MarketplaceGroup>, SourceError> {
        let url = self.groups_url();
        tracing::debug!(url = %url, "fetching marketplace groups");
        let response: ListResponse<MarketplaceGroup> = send_json(
            self.client.get(&url),
            &url,
            &format!("groups of category {}", self.category_id),
        )
        .await?;
        Ok(response.into_items())
    }

    /// All products listed in one group, cards and sealed products alike.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_groups`].
    pub async fn fetch_products(
        &self,
        group_id: i64,
    ) -> Result<Vec<MarketplaceProduct>, SourceError> {
        let url = self.products_url(group_id);
        tracing::debug!(url = %url, group_id, "fetching marketplace products");
        let response: ListResponse<MarketplaceProduct> = send_json(
            self.client.get(&url),
            &url,
            &format!("products of group {group_id}"),
        )
        .await?;
        Ok(response.into_items())
    }
}
