//! Reading introspection responses

use serde_json::Value;

use crate::domain::Role;

/// Loose truthiness used for the `active` flag.
///
/// Missing, `null`, `false`, zero, `""`, `"0"` and empty containers are
/// all false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty() && text != "0",
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

/// `email`, or `preferred_username` when `email` is absent or null
pub fn resolve_email(claims: &Value) -> Option<String> {
    let candidate = match claims.get("email") {
        Some(Value::Null) | None => claims.get("preferred_username"),
        present => present,
    };

    candidate
        .and_then(Value::as_str)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
}

/// Realm roles carrying the `ROLE_` prefix, deduplicated, with the baseline
/// role appended when missing
pub fn realm_roles(claims: &Value) -> Vec<String> {
    let entries = claims
        .get("realm_access")
        .and_then(|access| access.get("roles"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut roles: Vec<String> = Vec::new();

    for role in entries.iter().filter_map(Value::as_str) {
        if role.starts_with("ROLE_") && !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
    }

    let baseline = Role::BASELINE.as_str();
    if !roles.iter().any(|r| r == baseline) {
        roles.push(baseline.to_string());
    }

    roles
}
