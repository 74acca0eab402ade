use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector value meaning "no constraint".
pub const ALL: &str = "all";

/// Vendor selector value that matches models without a vendor.
pub const UNKNOWN_VENDOR: &str = "unknown";

/// One filter dimension's current selection: the `all` sentinel or a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    #[default]
    All,
    Value(String),
}

impl Selector {
    /// Parses a raw selector. `"all"` and the empty string both mean no constraint.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.is_empty() || raw == ALL {
            Self::All
        } else {
            Self::Value(raw)
        }
    }

    /// Returns the concrete value, or `None` for the sentinel.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(v) => Some(v.as_str()),
        }
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Selector {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<Option<String>> for Selector {
    fn from(raw: Option<String>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::All => ALL.to_string(),
            Selector::Value(v) => v,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(ALL))
    }
}

/// Independently selectable facets of the model list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Group,
    QuotaType,
    EndpointType,
    Vendor,
    Tag,
    Search,
}

impl Dimension {
    /// Evaluation order of the constraints.
    pub const ALL: [Dimension; 7] = [
        Dimension::Category,
        Dimension::Group,
        Dimension::QuotaType,
        Dimension::EndpointType,
        Dimension::Vendor,
        Dimension::Tag,
        Dimension::Search,
    ];

    /// Stable discriminant used when fingerprinting cache keys.
    #[inline(always)]
    pub(crate) fn tag(self) -> u8 {
        match self {
            Dimension::Category => 1,
            Dimension::Group => 2,
            Dimension::QuotaType => 3,
            Dimension::EndpointType => 4,
            Dimension::Vendor => 5,
            Dimension::Tag => 6,
            Dimension::Search => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Group => "group",
            Dimension::QuotaType => "quota_type",
            Dimension::EndpointType => "endpoint_type",
            Dimension::Vendor => "vendor",
            Dimension::Tag => "tag",
            Dimension::Search => "search",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current filter state supplied by the caller on every derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub category: Selector,
    pub group: Selector,
    pub quota_type: Selector,
    pub endpoint_type: Selector,
    pub vendor: Selector,
    pub tag: Selector,
    /// Free-text search; empty means no constraint.
    pub search: String,
}

impl FilterSelection {
    /// Selector for a faceted dimension. `Search` has no selector.
    pub fn selector(&self, dimension: Dimension) -> Option<&Selector> {
        match dimension {
            Dimension::Category => Some(&self.category),
            Dimension::Group => Some(&self.group),
            Dimension::QuotaType => Some(&self.quota_type),
            Dimension::EndpointType => Some(&self.endpoint_type),
            Dimension::Vendor => Some(&self.vendor),
            Dimension::Tag => Some(&self.tag),
            Dimension::Search => None,
        }
    }

    /// True when no dimension imposes a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && Dimension::ALL
                .iter()
                .filter_map(|d| self.selector(*d))
                .all(Selector::is_all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_empty_parse_to_sentinel() {
        assert_eq!(Selector::parse("all"), Selector::All);
        assert_eq!(Selector::parse(""), Selector::All);
        assert_eq!(Selector::from(None), Selector::All);
        assert_eq!(
            Selector::parse("OpenAI"),
            Selector::Value("OpenAI".to_string())
        );
    }

    #[test]
    fn selector_serializes_as_plain_string() {
        let selection = FilterSelection {
            vendor: Selector::from("unknown"),
            ..Default::default()
        };
        let json = serde_json::to_value(&selection).expect("serialize selection");
        assert_eq!(json["vendor"], "unknown");
        assert_eq!(json["group"], "all");

        let back: FilterSelection = serde_json::from_value(json).expect("deserialize selection");
        assert_eq!(back, selection);
    }

    #[test]
    fn default_selection_is_unconstrained() {
        assert!(FilterSelection::default().is_unconstrained());

        let searching = FilterSelection {
            search: "gpt".to_string(),
            ..Default::default()
        };
        assert!(!searching.is_unconstrained());
    }
}
