use std::io::{self, IsTerminal};

use anyhow::Result;

use project_manager::services::{CustomerService, ProjectService};
use project_manager::shell::Shell;
use project_manager::{config, db, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;

    // Load configuration
    let config = config::init()?;
    println!("Startar projekthanteringen...");

    // Connect and make sure the tables exist
    let db = db::init(&config).await?;

    // Wire repositories into services
    let customers = CustomerService::new(db.customers());
    let projects = ProjectService::new(customers, db.projects());

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let stdin = io::stdin();
    let mut shell = Shell::new(projects, stdin.lock(), stdout).with_color(color);

    // Storage errors end the session and are reported once by the runtime
    shell.run().await
}
