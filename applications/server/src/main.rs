/// Muse Server - music discovery and social profile backend
use clap::{Parser, Subcommand};
use muse_core::{UserProfile, UserStore};
use muse_server::{app, config::ServerConfig, services::AuthService};
use muse_storage::JsonUserStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "muse-server")]
#[command(about = "Muse music discovery backend", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(short, long)]
        dob: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muse_server=info,muse_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            name,
            dob,
        } => {
            add_user(&config, &username, &password, &name, &dob).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Muse Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = app::build_state(&config).await?;
    let app = app::create_router(
        app_state,
        &config.server.public_dir,
        config.uploads.max_body_bytes,
    );

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_users(config: &ServerConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    let users = JsonUserStore::new(config.storage.users_file.clone());
    users.initialize().await?;
    Ok(Arc::new(users))
}

async fn add_user(
    config: &ServerConfig,
    username: &str,
    password: &str,
    name: &str,
    dob: &str,
) -> anyhow::Result<()> {
    let users = open_users(config).await?;
    let auth_service = AuthService::new(users, config.auth.bcrypt_cost);

    let user = auth_service.signup(username, password, name, dob).await?;
    println!("Created user: {}", user.username);

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let users = open_users(config).await?.list().await?;

    println!("Users:");
    for user in users.iter().map(UserProfile::from) {
        println!("  {} - {} (born {})", user.username, user.name, user.dob);
    }

    Ok(())
}
