use crate::error::HarvestError;
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::info;

const E: &str = "Invalid selector";
lazy_static! {
    static ref A: Selector = Selector::parse("a").expect(E);
}

/// Navigation anchors whose text mentions the syllabus or academics section,
/// as "text -> href" lines.
pub fn navigation_links(doc: &Html) -> Vec<String> {
    doc.select(&A)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let text = a.text().collect::<String>().trim().to_lowercase();
            if text.contains("syllabus") || text.contains("academic") {
                Some(format!("{} -> {}", text, href))
            } else {
                None
            }
        })
        .collect()
}

/// Fetch one page and print its relevant navigation links.
pub async fn probe(client: &Client, url: &str) -> Result<(), HarvestError> {
    info!("Fetching {}...", url);
    let resp = client.get(url).send().await?;
    info!("Status code: {}", resp.status());
    if !resp.status().is_success() {
        return Ok(());
    }
    let html = resp.text().await?;

    let links = {
        let doc = Html::parse_document(&html);
        navigation_links(&doc)
    };
    println!("Found {} navigation links.", links.len());
    for link in &links {
        println!("{}", link);
    }
    Ok(())
}
