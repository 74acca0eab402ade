pub mod api;
pub mod pricing;

mod de;

pub use api::{CatalogMetaBody, FacetsBody, ModelPageBody, RefreshBody};
pub use pricing::{EndpointInfo, PricingEnvelope, PricingModel, PricingVendor};
