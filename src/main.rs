use anyhow::Result;

mod app;
mod logging;

use tag_move::cli;

fn main() -> Result<()> {
    let args = cli::parse();
    app::run(args)
}
