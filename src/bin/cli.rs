use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sitekit::cli::{create_superuser, init_db};
use sitekit_config::Settings;
use sitekit_db::init_db_pool;

#[derive(Parser)]
#[command(name = "sitekit-cli")]
#[command(about = "sitekit CLI - administrative tools for the site and its dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a dashboard user
    CreateSuperuser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply migrations, create the site configuration row and the first superuser
    InitDb,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitekit=info".into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::from_env();
    let pool = init_db_pool(&settings.database)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateSuperuser { email, password } => {
            let email = match email {
                Some(email) => email,
                None => Input::new()
                    .with_prompt("Email address")
                    .interact_text()
                    .context("Failed to read email")?,
            };
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()
                    .context("Failed to read password")?,
            };

            let user = create_superuser(&pool, &email, &password).await?;
            println!("\n✅ Superuser created successfully!");
            println!("   Email: {}", user.email);
        }
        Commands::InitDb => {
            init_db(&pool, &settings.app).await?;
            println!("\n✅ Database initialized");
        }
    }

    Ok(())
}
