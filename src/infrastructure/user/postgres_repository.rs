//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::user::{RoleSet, User, UserFilter, UserRepository};
use crate::domain::{DomainError, Timestamped, Timestamps};

const USER_COLUMNS: &str = "id, email, roles, created_at, updated_at, deleted_at";

/// Shared WHERE clause; `$1` is the email fragment, `$2` the role name
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::text IS NULL OR POSITION(LOWER($1::text) IN LOWER(email)) > 0)
      AND ($2::text IS NULL OR roles @> jsonb_build_array($2::text))
"#;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, roles, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id())
        .bind(user.email())
        .bind(Json(user.roles().names()))
        .bind(user.created_at())
        .bind(user.updated_at())
        .bind(user.deleted_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &user, "create"))?;

        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        user.touch();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, roles = $3, updated_at = $4, deleted_at = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id())
        .bind(user.email())
        .bind(Json(user.roles().names()))
        .bind(user.updated_at())
        .bind(user.deleted_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &user, "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user)
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "SELECT {} FROM users {} ORDER BY created_at, id LIMIT $3 OFFSET $4",
            USER_COLUMNS, FILTER_CLAUSE
        );

        let rows = sqlx::query(&sql)
            .bind(filter.email.as_deref())
            .bind(filter.role.map(|role| role.as_str()))
            .bind(i64::from(filter.per_page()))
            .bind(i64::try_from(filter.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        let sql = format!("SELECT COUNT(*) FROM users {}", FILTER_CLAUSE);

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.email.as_deref())
            .bind(filter.role.map(|role| role.as_str()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count.max(0) as usize)
    }
}

/// Unique violations become conflicts, everything else a storage error
fn write_error(error: sqlx::Error, user: &User, action: &str) -> DomainError {
    let unique_violation = error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique_violation {
        DomainError::conflict(format!("Email '{}' already exists", user.email()))
    } else {
        DomainError::storage(format!("Failed to {} user: {}", action, error))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: Uuid = row.get("id");
    let email: String = row.get("email");
    let Json(roles): Json<Vec<String>> = row.get("roles");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: Option<DateTime<Utc>> = row.get("updated_at");
    let deleted_at: Option<DateTime<Utc>> = row.get("deleted_at");

    Ok(User::restore(
        id,
        email,
        roles_from_column(roles)?,
        Timestamps::restore(created_at, updated_at, deleted_at),
    ))
}

fn roles_from_column(roles: Vec<String>) -> Result<RoleSet, DomainError> {
    RoleSet::normalize(roles)
        .map_err(|e| DomainError::storage(format!("Invalid roles in database: {}", e)))
}
