use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Weather cache server.")]
pub struct Cli {
    #[arg(env = "WEATHER_DATABASE_URL", short, long)]
    pub database_url: String,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the weather API.
    Http {
        #[arg(env = "WEATHER_SERVER_ADDRESS", default_value = "0.0.0.0:5000")]
        address: std::net::SocketAddr,
    },
    Db(DbCommand),
}

#[derive(Debug, Parser)]
pub struct DbCommand {
    #[command(subcommand)]
    pub cmd: DbSubCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbSubCommand {
    /// Drop the weather tables and migrate again.
    Reset,
    Migrate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_default_address() {
        let cli = Cli::try_parse_from(["weather-cache", "-d", "postgres://localhost/weather", "http"])
            .unwrap();

        assert_eq!(cli.database_url, "postgres://localhost/weather");
        match cli.cmd {
            Command::Http { address } => assert_eq!(address.port(), 5000),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_db_migrate() {
        let cli = Cli::try_parse_from([
            "weather-cache",
            "--database-url",
            "postgres://localhost/weather",
            "db",
            "migrate",
        ])
        .unwrap();

        assert!(matches!(
            cli.cmd,
            Command::Db(DbCommand {
                cmd: DbSubCommand::Migrate
            })
        ));
    }
}
