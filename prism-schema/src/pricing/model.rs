use crate::de::null_as_default;
use prism_filter_core::FilterableModel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// One row of the upstream pricing listing.
///
/// `category`, `display_name` and the `vendor_*` fields are filled in by the
/// catalog formatter; upstream usually only sends `vendor_id`. Unknown fields
/// are kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PricingModel {
    pub model_name: String,

    /// Billing mode: `0` per-token ratio, `1` per-call price.
    pub quota_type: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub enable_groups: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub supported_endpoint_types: Vec<String>,

    #[serde(default)]
    pub model_ratio: f64,

    #[serde(default)]
    pub model_price: f64,

    #[serde(default)]
    pub completion_ratio: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilterableModel for PricingModel {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    fn vendor_name(&self) -> Option<&str> {
        self.vendor_name.as_deref()
    }

    fn enable_groups(&self) -> &[String] {
        &self.enable_groups
    }

    fn quota_type(&self) -> Cow<'_, str> {
        Cow::Owned(self.quota_type.to_string())
    }

    fn supported_endpoint_types(&self) -> &[String] {
        &self.supported_endpoint_types
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_lists_deserialize_as_empty() {
        let model: PricingModel = serde_json::from_value(json!({
            "model_name": "gpt-4o",
            "quota_type": 0,
            "enable_groups": null,
            "supported_endpoint_types": null
        }))
        .expect("deserialize pricing model");

        assert!(model.enable_groups.is_empty());
        assert!(model.supported_endpoint_types.is_empty());
        assert_eq!(FilterableModel::quota_type(&model), "0");
    }

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let raw = json!({
            "model_name": "gpt-4o",
            "quota_type": 1,
            "owner_by": "openai",
            "icon": "OpenAI"
        });
        let model: PricingModel = serde_json::from_value(raw).expect("deserialize pricing model");
        assert_eq!(model.extra.get("owner_by"), Some(&json!("openai")));

        let back = serde_json::to_value(&model).expect("serialize pricing model");
        assert_eq!(back["icon"], "OpenAI");
        assert!(back.get("vendor_name").is_none());
    }
}
