//! Walks through the basic table workflow against a running server.
//!
//! ```bash
//! RUST_LOG=table_link=debug cargo run --example users
//! ```

use table_link::{Column, ConditionSet, DataType, Row, TableClient, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> table_link::Result<()> {
    let client = TableClient::new(DEFAULT_BASE_URL)?;

    let outcome = client
        .create_table(
            "users",
            &[
                Column::new("id", DataType::Int),
                Column::new("name", DataType::String),
                Column::new("active", DataType::Bool),
            ],
        )
        .await?;
    println!("create users: {:?}", outcome);

    client
        .insert(
            "users",
            &Row::new()
                .with("id", 1)
                .with("name", "John Doe")
                .with("active", true),
        )
        .await?;
    println!("inserted John Doe");

    let active = ConditionSet::all().with("active", true);
    for row in client.select("users", &active).await? {
        let fields: Vec<String> = row.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("active user: {}", fields.join(", "));
    }

    let updated = client
        .update(
            "users",
            &ConditionSet::all().with("name", "John Doe"),
            &Row::new().with("active", false),
        )
        .await?;
    println!("deactivated {} user(s)", updated);

    let remaining = client.select("users", &active).await?;
    println!("active users left: {}", remaining.len());

    Ok(())
}
