//! Paginate Example
//!
//! Walks every page of a running search server and prints the users.
//!
//! Start the server first (`cargo run -p usersearch-server`), then:
//! Run with: cargo run -p usersearch-rs --example paginate

use usersearch_rs::{ClientConfig, OrderBy, SearchClient, SearchRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("usersearch_rs=debug")
        .init();

    let config = ClientConfig::load("client.json").unwrap_or_else(|_| {
        println!("client.json not found, using http://localhost:8080");
        ClientConfig::new("http://localhost:8080", "Test")
    });
    let client = SearchClient::from_config(&config)?;

    let page_size = 10;
    let mut offset = 0;
    let mut page_no = 1;

    loop {
        let req = SearchRequest::new(page_size, offset).ordered_by("Age", OrderBy::Asc);
        let page = client.find_users(req).await?;

        println!("📄 Page {}", page_no);
        for user in &page.users {
            println!("   {:>3}  {:<24} age {}", user.id, user.name, user.age);
        }

        if !page.next_page {
            break;
        }
        offset += page.users.len() as i64;
        page_no += 1;
    }

    println!("\n✅ Done after {} pages", page_no);
    Ok(())
}
