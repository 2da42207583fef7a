//! This crate contains the source code for the binary for the game mazecrawl.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazecrawl::{cli::Cli, App};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    cli.init_logging()?;
    let mut app = App::new(cli.maze_params(), cli.game_params(), cli.seed)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
