use clap::{Parser, Subcommand};

/// Terminal client for the HR employee self-service API
#[derive(Debug, Parser)]
#[command(name = "workmate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the calendar for a month
    Calendar {
        /// Month to show, as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show today's events
    Today,
    /// Show the events of the next seven days
    Week,
    /// List company announcements
    Announcements,
    /// Run scheduled digests and poll for new events and announcements
    Watch,
}
