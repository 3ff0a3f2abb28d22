use bevy::app::AppExit;
use clap::Parser;

mod app;
mod cli;
mod ui;

fn main() -> AppExit {
    cli::Cli::parse().run()
}
