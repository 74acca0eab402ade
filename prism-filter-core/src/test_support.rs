use crate::record::FilterableModel;
use std::borrow::Cow;

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeModel {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub vendor_name: Option<String>,
    pub enable_groups: Vec<String>,
    pub quota_type: String,
    pub endpoints: Vec<String>,
    pub category: Option<String>,
}

impl FakeModel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn display(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn tags(mut self, tags: &str) -> Self {
        self.tags = Some(tags.to_string());
        self
    }

    pub fn vendor(mut self, vendor: &str) -> Self {
        self.vendor_name = Some(vendor.to_string());
        self
    }

    pub fn groups(mut self, groups: &[&str]) -> Self {
        self.enable_groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn quota(mut self, quota_type: &str) -> Self {
        self.quota_type = quota_type.to_string();
        self
    }

    pub fn endpoints(mut self, endpoints: &[&str]) -> Self {
        self.endpoints = endpoints.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

impl FilterableModel for FakeModel {
    fn model_name(&self) -> &str {
        &self.name
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
        Cow::Borrowed(&self.quota_type)
    }

    fn supported_endpoint_types(&self) -> &[String] {
        &self.endpoints
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}
