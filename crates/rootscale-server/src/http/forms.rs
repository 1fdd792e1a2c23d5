// SPDX-License-Identifier: Apache-2.0

use rootscale_model::{OpenGroups, DEFAULT_GROUP, NEW_GROUP_SENTINEL};

/// Decoded `application/x-www-form-urlencoded` pairs. Unlike a map, repeated
/// keys such as `open_groups` keep every value in order.
#[derive(Debug, Clone, Default)]
pub(crate) struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub(crate) fn parse(raw: &[u8]) -> Self {
        Self(url::form_urlencoded::parse(raw).into_owned().collect())
    }

    pub(crate) fn from_query(query: Option<&str>) -> Self {
        query.map_or_else(Self::default, |q| Self::parse(q.as_bytes()))
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, only when it is not blank.
    pub(crate) fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub(crate) fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn open_groups(&self, key: &str) -> OpenGroups {
        self.get_all(key).collect()
    }
}

/// Resolves the group selector of the save and change-group forms. Picking
/// the new-group option reads `new_group`, which falls back to the default
/// group when blank. Returns the group and whether it was newly named.
pub(crate) fn resolve_group_choice(fields: &FormFields) -> (String, bool) {
    match fields.get("group") {
        Some(NEW_GROUP_SENTINEL) => match fields.get("new_group").map(str::trim) {
            Some(name) if !name.is_empty() => (name.to_string(), true),
            _ => (DEFAULT_GROUP.to_string(), false),
        },
        Some(group) if !group.trim().is_empty() => (group.to_string(), false),
        _ => (DEFAULT_GROUP.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_keep_every_value() {
        let fields = FormFields::parse(b"open_groups=a&name=x&open_groups=b+c&open_groups=a");
        assert_eq!(fields.get("name"), Some("x"));
        assert_eq!(
            fields.get_all("open_groups").collect::<Vec<_>>(),
            vec!["a", "b c", "a"]
        );
        assert_eq!(fields.open_groups("open_groups").location(), "/?open=a&open=b+c");
    }

    #[test]
    fn new_group_sentinel_reads_trimmed_name_or_defaults() {
        let fields = FormFields::parse(b"group=__new__&new_group=+Shoes+");
        assert_eq!(resolve_group_choice(&fields), ("Shoes".to_string(), true));

        let fields = FormFields::parse(b"group=__new__&new_group=+++");
        assert_eq!(resolve_group_choice(&fields), ("Default".to_string(), false));

        let fields = FormFields::parse(b"group=Hats");
        assert_eq!(resolve_group_choice(&fields), ("Hats".to_string(), false));

        let fields = FormFields::parse(b"");
        assert_eq!(resolve_group_choice(&fields), ("Default".to_string(), false));
    }

    #[test]
    fn missing_query_parses_empty() {
        assert!(FormFields::from_query(None).get("open").is_none());
        let q = FormFields::from_query(Some("open=x&open=y"));
        assert_eq!(q.get_all("open").count(), 2);
    }
}
