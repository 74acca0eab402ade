mod envelope;
mod model;

pub use envelope::{EndpointInfo, PricingEnvelope, PricingVendor};
pub use model::PricingModel;
