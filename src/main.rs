use clap::Parser;
use users_api::cli::{self, Cli, Command};
use users_api::config::AppConfig;
use users_api::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    match cli.command {
        Command::Serve => cli::serve::run(&config).await,
        Command::CreateUser(args) => cli::create_user::run(&config, args).await,
        Command::Migrate(args) => cli::migrate::run(&config, args).await,
    }
}
