//! Placeholder substitution for message templates.

/// Placeholder for the project display name.
pub const PROJECT_KEY: &str = "%PROJECT%";
/// Placeholder for the build display name.
pub const BUILD_KEY: &str = "%BUILD%";
/// Placeholder for the build's terminal status.
pub const STATUS_KEY: &str = "%STATUS%";
/// Placeholder for the formatted culprit list.
pub const CULPRITS_KEY: &str = "%CULPRITS%";
/// Placeholder for a single culprit's display name.
pub const CULPRIT_NAME_KEY: &str = "%CULPRIT-NAME%";

/// Insertion-ordered placeholder map.
///
/// Substitution walks the entries in the order they were set, so iteration
/// order is deterministic per call. That ordering is observable: a
/// replacement value containing a later key's text gets rewritten again when
/// that key's turn comes. See [`substitute`].
#[derive(Debug, Clone, Default)]
pub struct SubstitutionMap {
    entries: Vec<(String, String)>,
}

impl SubstitutionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder's replacement, keeping the original position when
    /// the key was already present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Replace every occurrence of each placeholder with its value.
///
/// Keys are literal substrings, not tokens, and are applied sequentially in
/// insertion order rather than in one simultaneous pass. A value whose text
/// happens to contain a key set later in the map will itself be substituted
/// when that key is processed. This ordered behavior is long-standing and
/// relied upon; keep it when touching this function.
///
/// Placeholders in the template with no entry in the map are left unchanged.
#[must_use]
pub fn substitute(template: &str, values: &SubstitutionMap) -> String {
    let mut result = template.to_string();
    for (key, value) in values.iter() {
        result = result.replace(key, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_occurrence() {
        let mut map = SubstitutionMap::new();
        map.set("%CULPRIT%", "Christer");
        map.set(PROJECT_KEY, "website");
        let input = "Dear %CULPRIT%, your project %PROJECT% is failing.";
        assert_eq!(
            substitute(input, &map),
            "Dear Christer, your project website is failing."
        );
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let mut map = SubstitutionMap::new();
        map.set(PROJECT_KEY, "website");
        assert_eq!(
            substitute("%PROJECT% build %BUILD%", &map),
            "website build %BUILD%"
        );
    }

    #[test]
    fn substitution_is_idempotent_when_values_contain_no_keys() {
        let mut map = SubstitutionMap::new();
        map.set(PROJECT_KEY, "website");
        map.set(STATUS_KEY, "FAILURE");
        let once = substitute("%PROJECT% is %STATUS%", &map);
        assert_eq!(substitute(&once, &map), once);
    }

    #[test]
    fn values_containing_later_keys_are_rewritten_in_order() {
        let mut map = SubstitutionMap::new();
        map.set(PROJECT_KEY, "status of %STATUS%");
        map.set(STATUS_KEY, "FAILURE");
        // %PROJECT% expands first, then the %STATUS% inside its value is
        // replaced by the later entry.
        assert_eq!(substitute("%PROJECT%", &map), "status of FAILURE");
    }

    #[test]
    fn values_containing_earlier_keys_are_not_rewritten() {
        let mut map = SubstitutionMap::new();
        map.set(STATUS_KEY, "FAILURE");
        map.set(PROJECT_KEY, "status of %STATUS%");
        assert_eq!(substitute("%PROJECT%", &map), "status of %STATUS%");
    }

    #[test]
    fn set_replaces_in_place() {
        let mut map = SubstitutionMap::new();
        map.set(STATUS_KEY, "FAILURE");
        map.set(PROJECT_KEY, "website");
        map.set(STATUS_KEY, "SUCCESS");
        assert_eq!(map.get(STATUS_KEY), Some("SUCCESS"));
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![STATUS_KEY, PROJECT_KEY]);
    }
}
