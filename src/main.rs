//! lightbnb - query the LightBnB database from the command line.

mod cli;

use cli::{Cli, Command, UserArgs};
use lightbnb_store::config::{Config, ConnectionConfig};
use lightbnb_store::error::{Result, StoreError};
use lightbnb_store::logging;
use lightbnb_store::store::{NewProperty, NewUser, Store};
use serde::Serialize;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // A missing .env is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
        StoreError::config("No database connection configured. Use --help for usage information.")
    })?;
    info!("Connection: {}", connection.display_string());

    let db = lightbnb_store::db::connect(&connection).await?;
    let store = Store::new(db.as_ref());
    let default_limit = config.search.default_limit;

    let outcome = execute(&store, cli.command, default_limit).await;

    if let Err(e) = db.close().await {
        warn!("Failed to close connection: {e}");
    }
    outcome
}

/// Runs one subcommand and prints its rows to stdout.
async fn execute(store: &Store<'_>, command: Command, default_limit: u32) -> Result<()> {
    match command {
        Command::User(UserArgs { email, id }) => {
            let user = match (email, id) {
                (Some(email), _) => store.get_user_with_email(&email).await?,
                (None, Some(id)) => store.get_user_with_id(id).await?,
                (None, None) => return Err(StoreError::invalid_input("pass --email or --id")),
            };
            if user.is_none() {
                warn!("No matching user");
            }
            print_json(&user)
        }
        Command::AddUser {
            name,
            email,
            password,
        } => {
            let row = store
                .add_user(&NewUser {
                    name,
                    email,
                    password,
                })
                .await?;
            print_json(&row)
        }
        Command::Reservations { guest_id, limit } => {
            let rows = store
                .get_all_reservations(guest_id, Some(limit.unwrap_or(default_limit)))
                .await?;
            print_json(&rows)
        }
        Command::Search(args) => {
            let limit = args.limit.unwrap_or(default_limit);
            let rows = store
                .get_all_properties(&args.to_criteria(), Some(limit))
                .await?;
            print_json(&rows)
        }
        Command::AddProperty { file } => {
            let content = std::fs::read_to_string(&file).map_err(|e| {
                StoreError::invalid_input(format!("Failed to read {}: {e}", file.display()))
            })?;
            let property: NewProperty = serde_json::from_str(&content).map_err(|e| {
                StoreError::invalid_input(format!("Invalid property in {}: {e}", file.display()))
            })?;
            let rows = store.add_property(&property).await?;
            print_json(&rows)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::internal(format!("Failed to encode rows: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Resolves the final connection configuration from CLI args, config file, and environment.
///
/// A named connection (`-c NAME`) is the base and CLI connection flags
/// override its fields. Without a name, CLI flags are used alone; failing
/// those, the `default` config connection, then `DATABASE_URL`. `PG*`
/// variables fill whatever is still unset.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    let from_cli = cli.to_connection_config()?;

    let base = if let Some(name) = cli.connection_name() {
        let named = config.get_connection(Some(name)).cloned().ok_or_else(|| {
            StoreError::config(format!("Connection '{}' not found in config file", name))
        })?;
        Some(named)
    } else if from_cli.is_none() {
        match config.get_connection(None) {
            Some(default) => Some(default.clone()),
            None => std::env::var("DATABASE_URL")
                .ok()
                .map(|url| ConnectionConfig::from_connection_string(&url))
                .transpose()?,
        }
    } else {
        None
    };

    let connection = match (base, from_cli) {
        (Some(mut base), Some(overrides)) => {
            base.merge(&overrides);
            Some(base)
        }
        (base, from_cli) => base.or(from_cli),
    };

    // PG* variables alone are enough to describe a connection
    let mut connection = connection.unwrap_or_default();
    connection.apply_env_defaults();
    if connection.database.is_none() {
        return Ok(None);
    }

    Ok(Some(connection))
}
