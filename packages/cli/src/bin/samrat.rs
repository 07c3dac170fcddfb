// ABOUTME: The samrat binary: serve the API or bootstrap an admin account

use clap::{Parser, Subcommand};
use std::process;

use samrat_api::{DbOptions, DbState};
use samrat_auth::hash_password;
use samrat_profiles::ProfileCreateInput;

#[derive(Parser)]
#[command(name = "samrat")]
#[command(about = "Samrat CRM - customer portal and admin backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve,
    /// Create an administrator account
    CreateAdmin {
        #[arg(long, help = "Full name for the new administrator")]
        name: String,
        #[arg(long, help = "Login email, must be unique")]
        email: String,
        #[arg(long, help = "Initial password")]
        password: String,
        #[arg(long, default_value = "admin", help = "Admin role label")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve => samrat_cli::run_server().await,
        Commands::CreateAdmin {
            name,
            email,
            password,
            role,
        } => create_admin(name, email, password, role).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn create_admin(
    name: String,
    email: String,
    password: String,
    role: String,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = samrat_cli::config::Config::from_env()?;
    let db = DbState::init_with_options(DbOptions {
        database_path: config.database_path,
        blob_dir: config.blob_dir,
        ..Default::default()
    })
    .await?;

    let password_hash = hash_password(&password)?;
    let profile = db
        .profile_storage
        .create_profile(
            ProfileCreateInput {
                role,
                full_name: name,
                email,
                membership: None,
            },
            &password_hash,
        )
        .await?;

    println!("Created administrator {} ({})", profile.full_name, profile.id);
    Ok(())
}
