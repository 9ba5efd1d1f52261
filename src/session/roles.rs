use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Normalized set of granted roles.
///
/// This is the single normalization point for the two shapes the service
/// emits (comma-joined string or native list) and the two spellings in
/// circulation (`ADMIN` vs `ROLE_ADMIN`). Everything downstream of the
/// session boundary sees only this canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    roles: BTreeSet<String>,
}

impl RoleSet {
    /// Parse a comma-joined role string, e.g. `"ROLE_ADMIN, user"`.
    #[must_use]
    pub fn parse(joined: &str) -> Self {
        Self::from_list(joined.split(','))
    }

    #[must_use]
    pub fn from_list<I>(raw: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let roles = raw.into_iter().filter_map(|r| canon(r.as_ref())).collect();
        Self { roles }
    }

    /// Membership check accepting bare and `ROLE_`-prefixed spellings,
    /// case-insensitively.
    #[must_use]
    pub fn has(&self, role: &str) -> bool {
        canon(role).is_some_and(|c| self.roles.contains(&c))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    /// Canonical comma-joined rendering, e.g. `"ADMIN,USER"`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.roles.iter().cloned().collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

fn canon(raw: &str) -> Option<String> {
    let upper = raw.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return None;
    }
    let bare = upper.strip_prefix("ROLE_").unwrap_or(&upper);
    if bare.is_empty() { None } else { Some(bare.to_string()) }
}

/// The role field as it arrives from the service: either shape decodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleInput {
    Joined(String),
    List(Vec<String>),
}

impl RoleInput {
    #[must_use]
    pub fn normalize(&self) -> RoleSet {
        match self {
            Self::Joined(s) => RoleSet::parse(s),
            Self::List(v) => RoleSet::from_list(v.iter()),
        }
    }
}

impl From<RoleInput> for RoleSet {
    fn from(input: RoleInput) -> Self {
        input.normalize()
    }
}

impl From<&str> for RoleInput {
    fn from(s: &str) -> Self {
        Self::Joined(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_spellings_are_equivalent() {
        let roles = RoleSet::parse("ROLE_ADMIN,ROLE_USER");
        assert!(roles.has("ADMIN"));
        assert!(roles.has("ROLE_ADMIN"));
        assert!(roles.has("admin"));
        assert!(!roles.has("AUDITOR"));
    }

    #[test]
    fn both_shapes_normalize_the_same() {
        let joined = RoleInput::Joined("ROLE_ADMIN, user".into()).normalize();
        let list = RoleInput::List(vec!["admin".into(), "ROLE_USER".into()]).normalize();
        assert_eq!(joined, list);
        assert_eq!(joined.joined(), "ADMIN,USER");
    }

    #[test]
    fn blank_entries_are_dropped() {
        let roles = RoleSet::parse(" ,ROLE_, ,USER");
        assert_eq!(roles.len(), 1);
        assert!(roles.has("user"));
    }

    #[test]
    fn untagged_decode_of_either_shape() {
        let joined: RoleInput = serde_json::from_str(r#""ROLE_ADMIN,ROLE_USER""#).unwrap();
        let list: RoleInput = serde_json::from_str(r#"["ADMIN","USER"]"#).unwrap();
        assert_eq!(joined.normalize(), list.normalize());
    }
}
