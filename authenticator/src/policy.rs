use discord::MemberInfo;
use std::{collections::HashSet, slice::Iter};

/// Role ids a member must hold at least one of.
///
/// Entries are trimmed and compared case-sensitively; blank entries are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequiredRoles(Vec<String>);

impl RequiredRoles {
    /// Parses a comma-separated list such as `"111, 222"`.
    pub fn parse(roles: &str) -> Self {
        roles.split(',').collect()
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RequiredRoles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let roles = iter
            .into_iter()
            .map(|role| role.as_ref().trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        Self(roles)
    }
}

impl<'a> IntoIterator for &'a RequiredRoles {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Whether the member holds any one of the required roles.
pub fn evaluate(member: &MemberInfo, required: &RequiredRoles) -> bool {
    let roles = member
        .roles()
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>();
    required.iter().any(|role| roles.contains(role.as_str()))
}
