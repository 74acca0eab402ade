use crate::matcher::dimension_matches;
use crate::record::{FilterableModel, known_vendor, normalize_tags};
use crate::selection::{Dimension, UNKNOWN_VENDOR};
use crate::subset::{DerivedSubsets, SubsetIndices};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub count: usize,
    pub disabled: bool,
}

/// One dimension's candidate values, counted against the subset that lifts
/// the dimension's own constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Facet {
    /// Count shown next to the `all` option.
    pub all_count: usize,
    pub options: Vec<FacetOption>,
}

impl Facet {
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacetSet {
    pub category: Facet,
    pub vendor: Facet,
    pub tag: Facet,
    pub group: Facet,
    pub quota_type: Facet,
    pub endpoint_type: Facet,
}

/// Builds every facet.
///
/// Candidate values come from the full list (so an option does not vanish
/// just because the current selection filters it out); counts come from the
/// derived subsets. `group_candidates`, when non-empty, replaces the groups
/// collected from the models.
pub fn build_facets<M: FilterableModel>(
    models: &[M],
    derived: &DerivedSubsets,
    group_candidates: &[String],
) -> FacetSet {
    let categories: BTreeSet<String> = models
        .iter()
        .filter_map(|m| m.category().map(str::to_string))
        .collect();

    let mut vendors: Vec<String> = models
        .iter()
        .filter_map(|m| known_vendor(m).map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if models.iter().any(|m| known_vendor(m).is_none()) {
        vendors.push(UNKNOWN_VENDOR.to_string());
    }

    let tags: BTreeSet<String> = models
        .iter()
        .filter_map(|m| m.tags())
        .flat_map(normalize_tags)
        .collect();

    let groups: Vec<String> = if group_candidates.is_empty() {
        models
            .iter()
            .flat_map(|m| m.enable_groups().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        group_candidates.to_vec()
    };

    let quota_types: BTreeSet<String> = models.iter().map(|m| m.quota_type().into_owned()).collect();

    let endpoint_types: BTreeSet<String> = models
        .iter()
        .flat_map(|m| m.supported_endpoint_types().iter().cloned())
        .collect();

    FacetSet {
        category: count_facet(models, &derived.category_models, Dimension::Category, categories),
        vendor: count_facet(models, &derived.vendor_models, Dimension::Vendor, vendors),
        tag: count_facet(models, &derived.tag_models, Dimension::Tag, tags),
        group: count_facet(models, &derived.group_count_models, Dimension::Group, groups),
        quota_type: count_facet(
            models,
            &derived.quota_type_models,
            Dimension::QuotaType,
            quota_types,
        ),
        endpoint_type: count_facet(
            models,
            &derived.endpoint_type_models,
            Dimension::EndpointType,
            endpoint_types,
        ),
    }
}

fn count_facet<M, I>(models: &[M], subset: &SubsetIndices, dimension: Dimension, values: I) -> Facet
where
    M: FilterableModel,
    I: IntoIterator<Item = String>,
{
    let options = values
        .into_iter()
        .map(|value| {
            let count = subset
                .pick(models)
                .filter(|m| dimension_matches(*m, dimension, &value))
                .count();
            FacetOption {
                value,
                count,
                disabled: count == 0,
            }
        })
        .collect();

    Facet {
        all_count: subset.len(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::derive_subsets;
    use crate::selection::{FilterSelection, Selector};
    use crate::test_support::FakeModel;

    fn catalog() -> Vec<FakeModel> {
        vec![
            FakeModel::new("gpt-4")
                .vendor("OpenAI")
                .quota("0")
                .tags("Chat,Vision")
                .groups(&["default", "vip"])
                .endpoints(&["openai"])
                .category("standard"),
            FakeModel::new("pro/claude-3")
                .vendor("Anthropic")
                .quota("0")
                .tags("chat")
                .groups(&["vip"])
                .endpoints(&["anthropic", "openai"])
                .category("pro"),
            FakeModel::new("free/mystery")
                .quota("1")
                .tags("open weights")
                .groups(&["default"])
                .category("free"),
        ]
    }

    #[test]
    fn unconstrained_counts_cover_full_catalog() {
        let models = catalog();
        let derived = derive_subsets(&models, &FilterSelection::default());
        let facets = build_facets(&models, &derived, &[]);

        assert_eq!(facets.vendor.all_count, 3);
        let vendor_values: Vec<&str> = facets.vendor.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(vendor_values, vec!["Anthropic", "OpenAI", "unknown"]);
        assert_eq!(facets.vendor.count_of("unknown"), Some(1));

        assert_eq!(facets.tag.count_of("chat"), Some(2));
        assert_eq!(facets.tag.count_of("vision"), Some(1));
        assert_eq!(facets.tag.count_of("open weights"), Some(1));

        assert_eq!(facets.group.count_of("vip"), Some(2));
        assert_eq!(facets.quota_type.count_of("0"), Some(2));
        assert_eq!(facets.endpoint_type.count_of("openai"), Some(2));
        assert_eq!(facets.category.count_of("pro"), Some(1));
    }

    #[test]
    fn counts_respect_other_dimensions_but_not_own() {
        let models = catalog();
        let selection = FilterSelection {
            vendor: Selector::from("OpenAI"),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);
        let facets = build_facets(&models, &derived, &[]);

        // Vendor counts ignore the vendor selection itself.
        assert_eq!(facets.vendor.count_of("Anthropic"), Some(1));
        // Tag counts are narrowed to OpenAI models.
        assert_eq!(facets.tag.count_of("chat"), Some(1));
        let weights = facets
            .tag
            .options
            .iter()
            .find(|o| o.value == "open weights")
            .expect("option stays listed");
        assert_eq!(weights.count, 0);
        assert!(weights.disabled);
    }

    #[test]
    fn literal_unknown_vendor_merges_into_sentinel() {
        let models = vec![
            FakeModel::new("named-unknown").vendor("unknown").quota("0"),
            FakeModel::new("vendorless").quota("0"),
            FakeModel::new("gpt-4").vendor("OpenAI").quota("0"),
        ];
        let derived = derive_subsets(&models, &FilterSelection::default());
        let facets = build_facets(&models, &derived, &[]);

        let values: Vec<&str> = facets.vendor.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["OpenAI", "unknown"]);
        assert_eq!(facets.vendor.count_of("unknown"), Some(2));
    }

    #[test]
    fn explicit_group_candidates_replace_collected_groups() {
        let models = catalog();
        let derived = derive_subsets(&models, &FilterSelection::default());
        let candidates = vec!["vip".to_string(), "svip".to_string()];
        let facets = build_facets(&models, &derived, &candidates);

        let values: Vec<&str> = facets.group.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["vip", "svip"]);
        assert_eq!(facets.group.count_of("svip"), Some(0));
    }
}
