mod data;
mod pager;
mod prompt;
mod session;
mod stats;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    session::run()
}
