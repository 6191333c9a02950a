//! Walks a Linkshelf backend from the command line.
//!
//! ```text
//! LINKSHELF_API=http://localhost:8000/api cargo run -p browse -- rust [TOKEN]
//! ```
//!
//! Lists the categories and trending links, pages through every link in the
//! given category, and, with a token, renders the user dashboard the way a
//! server would.

use linkshelf::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let slug = args.next();
    let token = args.next();

    let config = Config::from_env();
    let backend = config.backend()?;
    tracing::info!(api = %config.api_url, app = %config.app_name, "browsing");

    let home = pages::home(&backend).await?;
    for category in &home.categories {
        println!("{:<24} /links/{}", category.name, category.slug);
    }
    println!("\nTrending");
    for link in &home.popular {
        println!("  [{:>4} clicks] {}", link.clicks, link.title);
    }

    if let Some(slug) = slug {
        let mut view = pages::category(&backend, &slug, config.page_limit).await?;
        let source = view.source(&backend);
        while let LoadOutcome::Appended(n) = view.links.load_more(&source).await? {
            tracing::debug!(appended = n, total = view.links.len(), "loaded more");
        }

        println!("\n{} ({} links)", view.category.name, view.links.len());
        for link in &view.popular {
            println!("  most popular: {} ({} clicks)", link.title, link.clicks);
        }
        for link in view.links.items() {
            println!("  [{:>4} clicks] {} <{}>", link.clicks, link.title, link.url);
        }
    }

    if let Some(token) = token {
        let header = format!("token={token}");
        let gate = pages::user_dashboard_gate(SessionResolver::new(backend));
        match gate.run(GateRequest::new(Environment::server(Some(header.as_str())))).await? {
            GateResult::Proceed(page) => {
                println!("\nSigned in as {} ({})", page.user.name, page.user.role);
                for link in &page.user_links {
                    println!("  {}", link.title);
                }
            }
            GateResult::Redirect(redirect) => {
                println!("\nNot signed in, would redirect to {}", redirect.location);
            }
        }
    }

    Ok(())
}
