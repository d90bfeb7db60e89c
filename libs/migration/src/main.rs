//! Catalog schema CLI, e.g. `cargo run -p migration -- up`

use migration::Migrator;
use sea_orm_migration::cli::run_cli;

#[tokio::main]
async fn main() {
    run_cli(Migrator).await;
}
