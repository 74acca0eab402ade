use crate::record::{FilterableModel, known_vendor, tags_contain};
use crate::selection::{Dimension, FilterSelection, UNKNOWN_VENDOR};
use crate::subset::{DerivedSubsets, SubsetIndices};

/// A selection prepared for repeated evaluation: case folding of the search
/// term and tag happens once instead of once per model.
#[derive(Debug)]
pub struct Matcher<'s> {
    selection: &'s FilterSelection,
    search_term: Option<String>,
    tag: Option<String>,
}

impl<'s> Matcher<'s> {
    pub fn new(selection: &'s FilterSelection) -> Self {
        let search_term = Some(selection.search.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let tag = selection.tag.value().map(str::to_lowercase);
        Self {
            selection,
            search_term,
            tag,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        self.selection
    }

    /// True when `model` satisfies every active constraint except `ignore`.
    pub fn matches<M: FilterableModel + ?Sized>(&self, model: &M, ignore: Option<Dimension>) -> bool {
        Dimension::ALL
            .into_iter()
            .filter(|d| Some(*d) != ignore)
            .all(|d| self.satisfies(model, d))
    }

    /// Evaluates a single dimension. An `all` selector or empty search always passes.
    pub fn satisfies<M: FilterableModel + ?Sized>(&self, model: &M, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Search => match self.search_term.as_deref() {
                None => true,
                Some(term) => search_matches(model, term),
            },
            Dimension::Tag => match self.tag.as_deref() {
                None => true,
                Some(tag) => tags_contain(model.tags(), tag),
            },
            other => match self.selection.selector(other).and_then(|s| s.value()) {
                None => true,
                Some(value) => dimension_matches(model, other, value),
            },
        }
    }

    /// Stable filter of `models` under every constraint except `ignore`.
    pub fn subset<M: FilterableModel>(&self, models: &[M], ignore: Option<Dimension>) -> SubsetIndices {
        let indices = models
            .iter()
            .enumerate()
            .filter(|(_, m)| self.matches(*m, ignore))
            .map(|(idx, _)| idx)
            .collect();
        SubsetIndices::from_vec(indices)
    }
}

/// Tests one faceted dimension against a concrete value.
///
/// For `Tag`, `value` must already be lower-case. `Search` is not a faceted
/// dimension and always returns true here.
pub fn dimension_matches<M: FilterableModel + ?Sized>(
    model: &M,
    dimension: Dimension,
    value: &str,
) -> bool {
    match dimension {
        Dimension::Category => model.category() == Some(value),
        Dimension::Group => model.enable_groups().iter().any(|g| g == value),
        Dimension::QuotaType => model.quota_type() == value,
        Dimension::EndpointType => model.supported_endpoint_types().iter().any(|e| e == value),
        Dimension::Vendor => {
            if value == UNKNOWN_VENDOR {
                known_vendor(model).is_none()
            } else {
                model.vendor_name() == Some(value)
            }
        }
        Dimension::Tag => tags_contain(model.tags(), value),
        Dimension::Search => true,
    }
}

/// Case-insensitive substring search; `term` must already be lower-case.
fn search_matches<M: FilterableModel + ?Sized>(model: &M, term: &str) -> bool {
    let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(term));

    contains(Some(model.model_name()))
        || contains(model.display_name())
        || contains(model.description())
        || contains(model.tags())
        || contains(model.vendor_name())
}

/// Derives every view from scratch. Equivalent to `FilterEngine::derive`
/// without the memo table.
pub fn derive_subsets<M: FilterableModel>(models: &[M], selection: &FilterSelection) -> DerivedSubsets {
    let matcher = Matcher::new(selection);
    DerivedSubsets {
        category_models: matcher.subset(models, Some(Dimension::Category)),
        group_count_models: matcher.subset(models, Some(Dimension::Group)),
        quota_type_models: matcher.subset(models, Some(Dimension::QuotaType)),
        endpoint_type_models: matcher.subset(models, Some(Dimension::EndpointType)),
        vendor_models: matcher.subset(models, Some(Dimension::Vendor)),
        tag_models: matcher.subset(models, Some(Dimension::Tag)),
        filtered: matcher.subset(models, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selector;
    use crate::test_support::FakeModel;

    fn two_models() -> Vec<FakeModel> {
        vec![
            FakeModel::new("gpt-4")
                .vendor("OpenAI")
                .quota("pay")
                .tags("chat,vision")
                .groups(&["default"]),
            FakeModel::new("claude-3")
                .vendor("Anthropic")
                .quota("pay")
                .tags("chat")
                .groups(&["pro"]),
        ]
    }

    fn names<'a>(models: &'a [FakeModel], subset: &'a SubsetIndices) -> Vec<&'a str> {
        subset.pick(models).map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn unconstrained_selection_keeps_everything() {
        let models = two_models();
        let derived = derive_subsets(&models, &FilterSelection::default());

        for subset in [
            &derived.category_models,
            &derived.group_count_models,
            &derived.quota_type_models,
            &derived.endpoint_type_models,
            &derived.vendor_models,
            &derived.tag_models,
            &derived.filtered,
        ] {
            assert_eq!(names(&models, subset), vec!["gpt-4", "claude-3"]);
        }
    }

    #[test]
    fn unknown_vendor_only_lifted_for_vendor_subset() {
        let models = two_models();
        let selection = FilterSelection {
            vendor: Selector::from("unknown"),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);

        assert_eq!(derived.vendor_models.len(), 2);
        assert!(derived.tag_models.is_empty());
        assert!(derived.quota_type_models.is_empty());
        assert!(derived.endpoint_type_models.is_empty());
        assert!(derived.group_count_models.is_empty());
        assert!(derived.filtered.is_empty());
    }

    #[test]
    fn search_narrows_every_subset() {
        let models = two_models();
        let selection = FilterSelection {
            search: "vision".to_string(),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);

        assert_eq!(names(&models, &derived.vendor_models), vec!["gpt-4"]);
        assert_eq!(names(&models, &derived.tag_models), vec!["gpt-4"]);
        assert_eq!(names(&models, &derived.group_count_models), vec!["gpt-4"]);
        assert_eq!(names(&models, &derived.filtered), vec!["gpt-4"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let models = two_models();
        let selection = FilterSelection {
            search: "GPT".to_string(),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);
        assert_eq!(names(&models, &derived.filtered), vec!["gpt-4"]);
    }

    #[test]
    fn search_covers_display_name_description_and_vendor() {
        let models = vec![
            FakeModel::new("pro/alpha").display("Alpha Turbo").quota("0"),
            FakeModel::new("beta").description("Fast Reasoner").quota("0"),
            FakeModel::new("gamma").vendor("DeepThink").quota("0"),
        ];
        let matcher_for = |term: &str| FilterSelection {
            search: term.to_string(),
            ..Default::default()
        };

        let turbo = derive_subsets(&models, &matcher_for("turbo"));
        assert_eq!(names(&models, &turbo.filtered), vec!["pro/alpha"]);

        let reasoner = derive_subsets(&models, &matcher_for("REASON"));
        assert_eq!(names(&models, &reasoner.filtered), vec!["beta"]);

        let vendor = derive_subsets(&models, &matcher_for("deepthink"));
        assert_eq!(names(&models, &vendor.filtered), vec!["gamma"]);
    }

    #[test]
    fn mixed_case_spaced_tags_match_normalized_selector() {
        let models = vec![FakeModel::new("m").quota("0").tags("Chat, Vision")];
        let selection = FilterSelection {
            tag: Selector::from("vision"),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);
        assert_eq!(derived.filtered.len(), 1);

        let upper = FilterSelection {
            tag: Selector::from("VISION"),
            ..Default::default()
        };
        assert_eq!(derive_subsets(&models, &upper).filtered.len(), 1);
    }

    #[test]
    fn missing_vendor_matches_unknown() {
        let models = vec![
            FakeModel::new("anon").quota("0"),
            FakeModel::new("blank").vendor("").quota("0"),
            FakeModel::new("named").vendor("OpenAI").quota("0"),
        ];
        let selection = FilterSelection {
            vendor: Selector::from("unknown"),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);

        assert_eq!(names(&models, &derived.tag_models), vec!["anon", "blank"]);
        assert_eq!(derived.vendor_models.len(), 3);
    }

    #[test]
    fn missing_groups_excluded_except_from_group_subset() {
        let models = vec![
            FakeModel::new("no-groups").quota("0"),
            FakeModel::new("grouped").quota("0").groups(&["default"]),
        ];
        let selection = FilterSelection {
            group: Selector::from("default"),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);

        for subset in [
            &derived.quota_type_models,
            &derived.endpoint_type_models,
            &derived.vendor_models,
            &derived.tag_models,
        ] {
            assert_eq!(names(&models, subset), vec!["grouped"]);
        }
        assert_eq!(
            names(&models, &derived.group_count_models),
            vec!["no-groups", "grouped"]
        );
    }

    #[test]
    fn endpoint_and_quota_use_exact_membership() {
        let models = vec![
            FakeModel::new("a").quota("0").endpoints(&["openai", "anthropic"]),
            FakeModel::new("b").quota("1").endpoints(&["openai"]),
            FakeModel::new("c").quota("0"),
        ];
        let selection = FilterSelection {
            endpoint_type: Selector::from("anthropic"),
            quota_type: Selector::from("0"),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);

        assert_eq!(names(&models, &derived.filtered), vec!["a"]);
        assert_eq!(names(&models, &derived.endpoint_type_models), vec!["a", "c"]);
        assert_eq!(names(&models, &derived.quota_type_models), vec!["a"]);
    }

    #[test]
    fn category_requires_exact_value() {
        let models = vec![
            FakeModel::new("pro/x").quota("0").category("pro"),
            FakeModel::new("y").quota("0").category("standard"),
            FakeModel::new("z").quota("0"),
        ];
        let selection = FilterSelection {
            category: Selector::from("pro"),
            ..Default::default()
        };
        let derived = derive_subsets(&models, &selection);

        assert_eq!(names(&models, &derived.filtered), vec!["pro/x"]);
        assert_eq!(derived.category_models.len(), 3);
    }

    fn catalog() -> Vec<FakeModel> {
        vec![
            FakeModel::new("gpt-4")
                .display("GPT 4")
                .vendor("OpenAI")
                .quota("0")
                .tags("chat,vision")
                .groups(&["default"])
                .endpoints(&["openai"])
                .category("standard"),
            FakeModel::new("pro/claude-3")
                .vendor("Anthropic")
                .quota("0")
                .tags("chat")
                .groups(&["vip"])
                .endpoints(&["anthropic"])
                .category("pro"),
            FakeModel::new("free/llama")
                .quota("1")
                .tags("open")
                .groups(&["default", "vip"])
                .endpoints(&["openai"])
                .category("free"),
        ]
    }

    fn with_own_value(base: &FilterSelection, dim: Dimension, value: &str) -> FilterSelection {
        let mut selection = base.clone();
        match dim {
            Dimension::Category => selection.category = Selector::from(value),
            Dimension::Group => selection.group = Selector::from(value),
            Dimension::QuotaType => selection.quota_type = Selector::from(value),
            Dimension::EndpointType => selection.endpoint_type = Selector::from(value),
            Dimension::Vendor => selection.vendor = Selector::from(value),
            Dimension::Tag => selection.tag = Selector::from(value),
            Dimension::Search => selection.search = value.to_string(),
        }
        selection
    }

    #[test]
    fn own_selector_never_changes_own_subset() {
        let models = catalog();
        let base = FilterSelection {
            category: Selector::from("standard"),
            group: Selector::from("default"),
            quota_type: Selector::from("0"),
            endpoint_type: Selector::from("openai"),
            vendor: Selector::from("OpenAI"),
            tag: Selector::from("chat"),
            search: "gpt".to_string(),
        };
        let values = ["all", "", "pro", "vip", "1", "anthropic", "unknown", "open", "llama", "nope"];

        for dim in Dimension::ALL {
            let baseline = Matcher::new(&base).subset(&models, Some(dim));
            for value in values {
                let changed = with_own_value(&base, dim, value);
                assert_eq!(
                    Matcher::new(&changed).subset(&models, Some(dim)),
                    baseline,
                    "{dim} = {value:?}"
                );
                if let Some(derived) = derive_subsets(&models, &changed).ignoring(dim) {
                    assert_eq!(*derived, baseline, "{dim} = {value:?}");
                }
            }
        }
    }

    #[test]
    fn derived_subsets_satisfy_remaining_constraints() {
        let models = catalog();
        let selections = [
            FilterSelection {
                tag: Selector::from("chat"),
                group: Selector::from("vip"),
                ..Default::default()
            },
            FilterSelection {
                vendor: Selector::from("unknown"),
                endpoint_type: Selector::from("openai"),
                search: "LLAMA".to_string(),
                ..Default::default()
            },
            FilterSelection {
                category: Selector::from("standard"),
                quota_type: Selector::from("0"),
                search: "gpt 4".to_string(),
                ..Default::default()
            },
        ];

        for selection in &selections {
            let matcher = Matcher::new(selection);
            let derived = derive_subsets(&models, selection);
            for dim in Dimension::ALL {
                let subset = matcher.subset(&models, Some(dim));
                assert!(subset.pick(&models).all(|m| matcher.matches(m, Some(dim))));
                // Nothing that satisfies the remaining constraints is dropped.
                let expected = models.iter().filter(|m| matcher.matches(*m, Some(dim))).count();
                assert_eq!(subset.len(), expected, "{dim}");
                if let Some(precomputed) = derived.ignoring(dim) {
                    assert_eq!(*precomputed, subset, "{dim}");
                }
            }
            assert!(derived.filtered.pick(&models).all(|m| matcher.matches(m, None)));
        }
    }

    #[test]
    fn search_lift_keeps_other_constraints() {
        let models = catalog();
        let selection = FilterSelection {
            group: Selector::from("default"),
            search: "claude".to_string(),
            ..Default::default()
        };
        let matcher = Matcher::new(&selection);

        assert!(matcher.subset(&models, None).is_empty());
        assert_eq!(
            names(&models, &matcher.subset(&models, Some(Dimension::Search))),
            vec!["gpt-4", "free/llama"]
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let models = two_models();
        let selection = FilterSelection {
            tag: Selector::from("chat"),
            ..Default::default()
        };
        assert_eq!(
            derive_subsets(&models, &selection),
            derive_subsets(&models, &selection)
        );
    }
}
