use anyhow::Result;
use tulind_cli::app;

fn main() -> Result<()> {
    app::run()
}
