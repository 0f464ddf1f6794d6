//! Out-of-band schema tool, e.g. `cargo run -p migration -- up`.
//!
//! Reads `DATABASE_URL` from the environment or a local `.env`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
