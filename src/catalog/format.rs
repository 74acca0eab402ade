use prism_schema::{PricingModel, PricingVendor};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Catalog tier encoded as a model name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelCategory {
    Pro,
    Standard,
    Free,
}

impl ModelCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelCategory::Pro => "pro",
            ModelCategory::Standard => "standard",
            ModelCategory::Free => "free",
        }
    }

    /// Splits `pro/…` and `free/…` names into their tier and display name.
    pub fn classify(model_name: &str) -> (Self, &str) {
        if let Some(rest) = model_name.strip_prefix("pro/") {
            (ModelCategory::Pro, rest)
        } else if let Some(rest) = model_name.strip_prefix("free/") {
            (ModelCategory::Free, rest)
        } else {
            (ModelCategory::Standard, model_name)
        }
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("pro") => ModelCategory::Pro,
            Some("free") => ModelCategory::Free,
            _ => ModelCategory::Standard,
        }
    }
}

/// Fills in category, display name and vendor details, then orders the list:
/// tier (pro, standard, free), quota type, display name.
pub fn format_models(mut models: Vec<PricingModel>, vendors: &[PricingVendor]) -> Vec<PricingModel> {
    let vendor_map: HashMap<i64, &PricingVendor> = vendors.iter().map(|v| (v.id, v)).collect();

    for model in &mut models {
        let (category, display_name) = ModelCategory::classify(&model.model_name);
        let display_name = display_name.to_string();
        model.category = Some(category.as_str().to_string());
        model.display_name = Some(display_name);

        if let Some(vendor) = model.vendor_id.and_then(|id| vendor_map.get(&id)) {
            model.vendor_name = Some(vendor.name.clone());
            model.vendor_icon = vendor.icon.clone();
            model.vendor_description = vendor.description.clone();
        }
    }

    models.sort_by(compare_models);
    models
}

fn compare_models(a: &PricingModel, b: &PricingModel) -> Ordering {
    let category = |m: &PricingModel| ModelCategory::parse(m.category.as_deref());
    let display = |m: &PricingModel| -> String {
        m.display_name
            .as_deref()
            .unwrap_or(m.model_name.as_str())
            .to_string()
    };

    category(a)
        .cmp(&category(b))
        .then_with(|| a.quota_type.cmp(&b.quota_type))
        .then_with(|| {
            let (da, db) = (display(a), display(b));
            da.to_lowercase()
                .cmp(&db.to_lowercase())
                .then_with(|| da.cmp(&db))
        })
}
