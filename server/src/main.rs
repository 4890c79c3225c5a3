use clap::Parser;
use cli::{Cli, Command, DbSubCommand};

mod cli;
mod config;
mod db;
mod error;
mod models;
mod provider;
mod repos;
mod server;
mod store;
mod weather;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();

    match args.cmd {
        Command::Http { address } => {
            let provider = config::ProviderConfig::from_env()?;
            server::run(address, &args.database_url, provider).await
        }
        Command::Db(db_cmd) => match db_cmd.cmd {
            DbSubCommand::Migrate => db::migrate(&args.database_url).await,
            DbSubCommand::Reset => db::reset(&args.database_url).await,
        },
    }
}
