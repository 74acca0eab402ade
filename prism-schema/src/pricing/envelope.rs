use super::PricingModel;
use crate::de::null_as_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response body of the upstream `GET /api/pricing` listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PricingEnvelope {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<PricingModel>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub vendors: Vec<PricingVendor>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub group_ratio: BTreeMap<String, f64>,

    /// Groups the caller may use, mapped to their descriptions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub usable_group: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub supported_endpoint: BTreeMap<String, EndpointInfo>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PricingVendor {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EndpointInfo {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: String,
}
