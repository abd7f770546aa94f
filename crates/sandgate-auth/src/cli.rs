//! CLI module for sandgate-auth.
//!
//! Inspects the SQL user store. Users are only ever created by logging in
//! through the proxy, so there are no add or remove commands.
//!
//! # Usage
//!
//! ```bash
//! # Initialize database schema
//! sandgate-users init -d sqlite:users.db
//!
//! # List users provisioned under a root
//! sandgate-users list -d sqlite:users.db --root /srv
//!
//! # Show one user as JSON
//! sandgate-users show -d sqlite:users.db alice
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use sandgate_core::defaults;
use tabled::{Table, Tabled};

use crate::sql::{SqlStore, SqlStoreConfig};
use crate::store::UserStore;
use crate::users::User;

/// User store management CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sandgate-users",
    version,
    about = "Inspect sandgate users"
)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommands,
}

/// Output format for `list`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Users CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum UsersCommands {
    /// Initialize database schema.
    Init {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,
    },

    /// List users under a root.
    List {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,

        /// Served root the users belong to.
        #[arg(short, long, default_value = defaults::DEFAULT_ROOT)]
        root: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show a single user as JSON.
    Show {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,

        /// Served root the user belongs to.
        #[arg(short, long, default_value = defaults::DEFAULT_ROOT)]
        root: String,

        /// Username.
        username: String,
    },
}

/// User row for display.
#[derive(Tabled)]
struct UserDisplay {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Locale")]
    locale: String,
    #[tabled(rename = "View")]
    view_mode: String,
    #[tabled(rename = "Admin")]
    admin: String,
    #[tabled(rename = "Commands")]
    commands: String,
}

impl From<&User> for UserDisplay {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            scope: user.scope.clone(),
            locale: user.locale.clone(),
            view_mode: user.view_mode.to_string(),
            admin: if user.perm.admin { "Yes" } else { "No" }.to_string(),
            commands: if user.commands.is_empty() {
                "-".to_string()
            } else {
                user.commands.join(" ")
            },
        }
    }
}

/// Run the users CLI with the given arguments.
///
/// This is the main entry point for the users CLI, used by both the
/// standalone binary and the unified sandgate CLI.
pub async fn run(args: UsersArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        UsersCommands::Init { database } => init_database(&database).await,
        UsersCommands::List {
            database,
            root,
            format,
        } => list_users(&database, &root, format).await,
        UsersCommands::Show {
            database,
            root,
            username,
        } => show_user(&database, &root, &username).await,
    }
}

/// Connect to database.
async fn connect(url: &str) -> Result<SqlStore, Box<dyn std::error::Error>> {
    let store = SqlStore::connect(SqlStoreConfig::new(url).max_connections(1)).await?;
    Ok(store)
}

/// Initialize database schema.
async fn init_database(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    connect(url).await?.init_schema().await?;
    println!("Database schema initialized successfully.");
    Ok(())
}

async fn list_users(
    url: &str,
    root: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let users = connect(url).await?.list(root).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Table => {
            if users.is_empty() {
                println!("No users found under {}.", root);
                return Ok(());
            }
            println!("{}", render_table(&users));
        }
    }
    Ok(())
}

async fn show_user(url: &str, root: &str, username: &str) -> Result<(), Box<dyn std::error::Error>> {
    match connect(url).await?.get(root, username).await? {
        Some(user) => {
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        None => Err(format!("user {username:?} not found under {root:?}").into()),
    }
}

fn render_table(users: &[User]) -> String {
    let rows: Vec<UserDisplay> = users.iter().map(UserDisplay::from).collect();
    Table::new(rows).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserDefaults;

    #[test]
    fn test_parse_list_defaults() {
        let args =
            UsersArgs::try_parse_from(["sandgate-users", "list", "-d", "sqlite::memory:"]).unwrap();
        match args.command {
            UsersCommands::List { root, format, .. } => {
                assert_eq!(root, "/srv");
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_show() {
        let args = UsersArgs::try_parse_from([
            "sandgate-users",
            "show",
            "-d",
            "sqlite::memory:",
            "--root",
            "/data",
            "alice",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            UsersCommands::Show { ref root, ref username, .. } if root == "/data" && username == "alice"
        ));
    }

    #[test]
    fn test_render_table() {
        let mut user = UserDefaults::default().new_user("alice");
        user.id = 3;
        user.commands = vec!["ls".into(), "git".into()];

        let table = render_table(&[user]);
        assert!(table.contains("Username"));
        assert!(table.contains("alice"));
        assert!(table.contains("ls git"));
    }
}
