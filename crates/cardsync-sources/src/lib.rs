pub mod error;
mod http;
pub mod marketplace;
pub mod price_normalize;
pub mod price_tracker;
pub mod price_types;

pub use error::SourceError;
pub use marketplace::{MarketplaceClient, MarketplaceGroup};
pub use price_normalize::{normalize_card, percent_change, primary_history, PricedCard};
pub use price_tracker::PriceTrackerClient;
pub use price_types::{CardsResponse, HistoryPoint, PriceTrackerCard};
