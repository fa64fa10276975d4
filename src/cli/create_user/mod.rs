//! Create-user command - adds a user without going through the HTTP API

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::storage::StorageFactory;
use crate::infrastructure::user::{CreateUserRequest, UserService};

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    /// Email of the new user
    #[arg(long)]
    pub email: String,

    /// Role to grant; repeat for several. `ROLE_USER` is always granted.
    #[arg(long = "role")]
    pub roles: Vec<String>,
}

pub async fn run(config: &AppConfig, args: CreateUserArgs) -> anyhow::Result<()> {
    let repository = StorageFactory::create_user_repository(&config.storage).await?;
    let service = UserService::new(repository);

    let user = service.create(request(args)).await?;

    info!(user_id = %user.id(), email = %user.email(), "User created");
    println!("{}", user.id());

    Ok(())
}

fn request(args: CreateUserArgs) -> CreateUserRequest {
    CreateUserRequest {
        email: args.email,
        roles: (!args.roles.is_empty()).then_some(args.roles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_roles_uses_baseline() {
        let request = request(CreateUserArgs {
            email: "jane@example.com".to_string(),
            roles: Vec::new(),
        });

        assert!(request.roles.is_none());
    }

    #[tokio::test]
    async fn test_run_against_memory_storage() {
        let args = CreateUserArgs {
            email: "jane@example.com".to_string(),
            roles: vec!["admin".to_string()],
        };

        run(&AppConfig::default(), args).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_role() {
        let args = CreateUserArgs {
            email: "jane@example.com".to_string(),
            roles: vec!["ROLE_ROOT".to_string()],
        };

        assert!(run(&AppConfig::default(), args).await.is_err());
    }
}
