// SPDX-License-Identifier: Apache-2.0

use crate::{DimensionRecord, DEFAULT_GROUP};
use std::collections::BTreeSet;

/// Form value of the group selector option that asks for a brand new group.
pub const NEW_GROUP_SENTINEL: &str = "__new__";

#[must_use]
pub fn normalize_group(group: &str) -> String {
    if group.trim().is_empty() {
        DEFAULT_GROUP.to_string()
    } else {
        group.to_string()
    }
}

/// HTML/query identifier for a group: spaces become hyphens, `/` and `.` are
/// dropped, then the result is lowercased.
#[must_use]
pub fn group_slug(group: &str) -> String {
    group
        .chars()
        .filter(|c| *c != '/' && *c != '.')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Distinct groups in the order their first member appears.
#[must_use]
pub fn groups_in_order(records: &[DimensionRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for rec in records {
        if seen.insert(rec.group.as_str()) {
            out.push(rec.group.clone());
        }
    }
    out
}

#[must_use]
pub fn sorted_groups(records: &[DimensionRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.group.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Slugs of the group panels that render expanded. The set lives only in
/// request parameters and is handed back on every redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGroups(Vec<String>);

impl OpenGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slug: impl Into<String>) {
        let slug = slug.into();
        if slug.is_empty() || self.0.contains(&slug) {
            return;
        }
        self.0.push(slug);
    }

    /// Marks the panel of `group` (a display name, not a slug) as open.
    pub fn open_group(&mut self, group: &str) {
        self.insert(group_slug(group));
    }

    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.0.iter().any(|s| s == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Query string carrying the set, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for slug in &self.0 {
            ser.append_pair("open", slug);
        }
        ser.finish()
    }

    /// Redirect target for the index page.
    #[must_use]
    pub fn location(&self) -> String {
        if self.0.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", self.query_string())
        }
    }
}

impl<S: Into<String>> FromIterator<S> for OpenGroups {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out = Self::new();
        for slug in iter {
            out.insert(slug);
        }
        out
    }
}
