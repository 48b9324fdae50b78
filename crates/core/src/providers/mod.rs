pub(crate) mod commodity_api_provider;
pub(crate) mod models;
pub(crate) mod upstream_provider;

pub use commodity_api_provider::CommodityApiProvider;
pub use models::{UpstreamObservation, UpstreamSymbol};
pub use upstream_provider::{UpstreamError, UpstreamProvider};
