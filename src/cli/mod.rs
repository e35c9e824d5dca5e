//! CLI module for the Sweet Shop API

pub mod serve;

use clap::{Parser, Subcommand};

/// Sweet Shop API - authenticated inventory and purchase backend
#[derive(Parser)]
#[command(name = "sweetshop-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
