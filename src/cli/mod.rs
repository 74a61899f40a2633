pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "users-api")]
#[command(about = "User records API with bearer-token authentication")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP service (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Print an Argon2 digest for a plaintext password")]
    HashPassword {
        #[arg(help = "Plaintext password")]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default()).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        Some(Commands::HashPassword { password }) => commands::hash_password::handle(&password),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["users-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_serve_flags() {
        let cli =
            Cli::try_parse_from(["users-api", "serve", "--port", "9000", "--in-memory"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.in_memory);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parses_hash_password() {
        let cli = Cli::try_parse_from(["users-api", "hash-password", "p1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::HashPassword { password }) if password == "p1"
        ));
    }
}
