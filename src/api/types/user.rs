//! Request and response bodies of the users endpoints

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::ApiError;
use crate::domain::user::{Role, UserFilter};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Body of `POST /api/users` and `PATCH /api/users/{id}`
///
/// Absent fields leave the user unchanged on update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserInput {
    #[validate(email(message = "This value is not a valid email address."))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_role_choices"))]
    pub roles: Option<Vec<String>>,
}

fn validate_role_choices(roles: &Vec<String>) -> Result<(), ValidationError> {
    for role in roles {
        if Role::from_str(role).is_err() {
            let mut error = ValidationError::new("choice");
            error.message = Some("The value you selected is not a valid choice.".into());
            return Err(error);
        }
    }

    Ok(())
}

impl UserInput {
    /// Validate for creation, where the email is mandatory
    pub fn into_create_request(self) -> Result<CreateUserRequest, ApiError> {
        self.validate().map_err(validation_error)?;

        let email = match self.email {
            Some(email) if !email.trim().is_empty() => email,
            _ => return Err(ApiError::bad_request("email: This value should not be blank.")),
        };

        Ok(CreateUserRequest {
            email,
            roles: self.roles,
        })
    }

    /// Validate for a partial update
    pub fn into_update_request(self) -> Result<UpdateUserRequest, ApiError> {
        self.validate().map_err(validation_error)?;

        Ok(UpdateUserRequest {
            email: self.email,
            roles: self.roles,
        })
    }
}

/// Flatten validator output into `field: message` lines
fn validation_error(errors: ValidationErrors) -> ApiError {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error.message.as_deref().unwrap_or(&error.code);
                format!("{}: {}", field, message)
            })
        })
        .collect();
    lines.sort();

    ApiError::bad_request(lines.join("\n"))
}

/// Query string of `GET /api/users`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub email: Option<String>,
    pub role: Option<String>,
    /// Alias of `role`
    pub roles: Option<String>,
    pub page: Option<i64>,
    pub items_per_page: Option<i64>,
}

impl UserListQuery {
    pub fn into_filter(self) -> Result<UserFilter, ApiError> {
        let mut filter = UserFilter::new().paginate(self.page, self.items_per_page);

        if let Some(email) = self.email {
            filter = filter.with_email(email);
        }

        if let Some(name) = self.role.or(self.roles).filter(|r| !r.trim().is_empty()) {
            let role = Role::parse_loose(&name).ok_or_else(|| {
                ApiError::bad_request(format!("role: '{}' is not a valid role.", name))
            })?;
            filter = filter.with_role(role);
        }

        Ok(filter)
    }
}

/// One page of users
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub page: u32,
    pub items_per_page: u32,
}
