//! Role enumeration and role-set normalization

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assigning roles
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// No entry of the input named an allowed role
    #[error("One or more provided roles are invalid.")]
    Invalid,

    /// A strict role name did not match the enumeration
    #[error("The value '{0}' is not a valid role. Allowed: ROLE_USER, ROLE_ADMIN")]
    UnknownRole(String),
}

/// Roles a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// Role every user holds
    pub const BASELINE: Role = Role::User;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    /// Lenient lookup: surrounding whitespace, case and the `ROLE_` prefix
    /// are ignored
    pub fn parse_loose(name: &str) -> Option<Self> {
        Self::from_canonical(&name.trim().to_uppercase())
    }

    /// Resolve an already trimmed and upper-cased name.
    ///
    /// Accepts both the prefixed (`ROLE_ADMIN`) and the bare (`ADMIN`) form.
    fn from_canonical(name: &str) -> Option<Self> {
        match name.strip_prefix("ROLE_").unwrap_or(name) {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parsing: only the exact `ROLE_*` names are accepted
impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RoleError::UnknownRole(s.to_string()))
    }
}

/// Normalized, non-empty, duplicate-free list of roles that always holds the
/// baseline role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    /// Normalize raw role names.
    ///
    /// Each entry is trimmed and upper-cased, unknown names are dropped and
    /// duplicates collapse onto their first occurrence. Fails when nothing
    /// survives; otherwise the baseline role is appended if missing.
    pub fn normalize<I, S>(raw: I) -> Result<Self, RoleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles: Vec<Role> = Vec::new();

        for candidate in raw {
            if let Some(role) = Role::parse_loose(candidate.as_ref()) {
                if !roles.contains(&role) {
                    roles.push(role);
                }
            }
        }

        if roles.is_empty() {
            return Err(RoleError::Invalid);
        }

        if !roles.contains(&Role::BASELINE) {
            roles.push(Role::BASELINE);
        }

        Ok(Self(roles))
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Role] {
        &self.0
    }

    /// Role names in order, e.g. `["ROLE_ADMIN", "ROLE_USER"]`
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|role| role.as_str().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self(vec![Role::BASELINE])
    }
}

impl TryFrom<Vec<String>> for RoleSet {
    type Error = RoleError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::normalize(value)
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(roles: RoleSet) -> Self {
        roles.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_baseline_only() {
        assert_eq!(RoleSet::default().as_slice(), &[Role::User]);
    }

    #[test]
    fn test_normalize_case_and_whitespace() {
        let roles = RoleSet::normalize(["role_admin", " ROLE_USER  "]).unwrap();
        assert_eq!(roles.as_slice(), &[Role::Admin, Role::User]);
    }

    #[test]
    fn test_normalize_appends_baseline_last() {
        let roles = RoleSet::normalize(["ADMIN"]).unwrap();
        assert_eq!(roles.names(), vec!["ROLE_ADMIN", "ROLE_USER"]);
    }

    #[test]
    fn test_normalize_keeps_input_order() {
        let roles = RoleSet::normalize(["user", "admin"]).unwrap();
        assert_eq!(roles.as_slice(), &[Role::User, Role::Admin]);
    }

    #[test]
    fn test_normalize_deduplicates() {
        let roles = RoleSet::normalize(["admin", "ROLE_ADMIN", " Admin ", "user", "USER"]).unwrap();
        assert_eq!(roles.as_slice(), &[Role::Admin, Role::User]);
    }

    #[test]
    fn test_normalize_drops_unknown_entries() {
        let roles = RoleSet::normalize(["ROLE_SUPERUSER", "admin", "role_"]).unwrap();
        assert_eq!(roles.as_slice(), &[Role::Admin, Role::User]);
    }

    #[test]
    fn test_normalize_rejects_only_invalid() {
        assert_eq!(RoleSet::normalize(["bogus"]), Err(RoleError::Invalid));
        assert_eq!(RoleSet::normalize(["role_invalid"]), Err(RoleError::Invalid));
    }

    #[test]
    fn test_normalize_rejects_empty_input() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(RoleSet::normalize(empty), Err(RoleError::Invalid));
    }

    #[test]
    fn test_normalize_always_contains_baseline() {
        let inputs: Vec<Vec<&str>> = vec![
            vec!["admin"],
            vec!["  user"],
            vec!["ROLE_ADMIN", "nope"],
            vec!["Role_User", "role_admin", "x"],
        ];

        for input in inputs {
            let roles = RoleSet::normalize(&input).unwrap();
            assert!(roles.contains(Role::User), "missing baseline for {:?}", input);
            assert!(roles.iter().all(|r| Role::ALL.contains(&r)));

            let unique: std::collections::HashSet<Role> = roles.iter().collect();
            assert_eq!(unique.len(), roles.len());
        }
    }

    #[test]
    fn test_parse_loose() {
        assert_eq!(Role::parse_loose(" admin "), Some(Role::Admin));
        assert_eq!(Role::parse_loose("role_user"), Some(Role::User));
        assert_eq!(Role::parse_loose("ROLE_ROOT"), None);
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("ROLE_USER".parse::<Role>(), Ok(Role::User));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(RoleError::UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn test_role_set_serde() {
        let roles = RoleSet::normalize(["admin"]).unwrap();
        let json = serde_json::to_string(&roles).unwrap();
        assert_eq!(json, r#"["ROLE_ADMIN","ROLE_USER"]"#);

        let parsed: RoleSet = serde_json::from_str(r#"["ROLE_ADMIN"]"#).unwrap();
        assert_eq!(parsed, roles);

        assert!(serde_json::from_str::<RoleSet>(r#"["nope"]"#).is_err());
    }
}
