use crate::selection::UNKNOWN_VENDOR;
use std::borrow::Cow;

/// Separators accepted between labels in a raw tags string.
pub const TAG_DELIMITERS: [char; 3] = [',', ';', '|'];

/// Read-only view of a model record as consumed by the filter engine.
///
/// Absent optional fields never error; they simply fail the constraint that
/// needs them.
pub trait FilterableModel {
    fn model_name(&self) -> &str;

    fn display_name(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str>;

    /// Raw, delimiter-separated label list.
    fn tags(&self) -> Option<&str>;

    fn vendor_name(&self) -> Option<&str>;

    fn enable_groups(&self) -> &[String];

    /// Billing mode discriminator in its canonical string form.
    fn quota_type(&self) -> Cow<'_, str>;

    fn supported_endpoint_types(&self) -> &[String];

    fn category(&self) -> Option<&str> {
        None
    }
}

/// Lower-cases and splits a raw tags string into trimmed, non-empty, de-duplicated labels.
/// Order of first appearance is kept.
pub fn normalize_tags(tags: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags
        .to_lowercase()
        .split(TAG_DELIMITERS)
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        if !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Membership test against the normalized tag set without allocating the set.
/// `needle` must already be lower-case.
pub(crate) fn tags_contain(tags: Option<&str>, needle: &str) -> bool {
    let Some(tags) = tags else {
        return false;
    };
    tags.to_lowercase()
        .split(TAG_DELIMITERS)
        .map(str::trim)
        .any(|t| !t.is_empty() && t == needle)
}

/// Vendor name with the empty string and a literal `unknown` folded into "absent",
/// so both land on the single `unknown` vendor option.
#[inline]
pub(crate) fn known_vendor<M: FilterableModel + ?Sized>(model: &M) -> Option<&str> {
    model
        .vendor_name()
        .filter(|v| !v.is_empty() && *v != UNKNOWN_VENDOR)
}
