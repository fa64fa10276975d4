//! Query filter for user listings

use super::entity::User;
use super::role::Role;

/// Filters and pagination applied when listing users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of the email
    pub email: Option<String>,
    /// Role the user must hold
    pub role: Option<Role>,
    page: u32,
    per_page: u32,
}

impl UserFilter {
    pub const DEFAULT_PER_PAGE: u32 = 25;
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn new() -> Self {
        Self {
            email: None,
            role: None,
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = if email.trim().is_empty() {
            None
        } else {
            Some(email)
        };
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Page numbers start at 1; page size is clamped to `1..=MAX_PER_PAGE`
    pub fn paginate(mut self, page: Option<i64>, per_page: Option<i64>) -> Self {
        self.page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32;
        self.per_page = per_page
            .unwrap_or(i64::from(Self::DEFAULT_PER_PAGE))
            .clamp(1, i64::from(Self::MAX_PER_PAGE)) as u32;
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Whether `user` passes the email and role filters
    pub fn matches(&self, user: &User) -> bool {
        if let Some(email) = &self.email {
            if !user.email().to_lowercase().contains(&email.to_lowercase()) {
                return false;
            }
        }

        if let Some(role) = self.role {
            if !user.has_role(role) {
                return false;
            }
        }

        true
    }
}

impl Default for UserFilter {
    fn default() -> Self {
        Self::new()
    }
}
