use super::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a user profile and token pair obtained elsewhere.
    Login {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        refresh_token: String,
    },
    /// Print the stored user.
    Whoami,
    /// Drop the stored user and tokens.
    Logout,
    /// Issue an authenticated GET and print the body.
    Get { path: String },
}
