use crate::data::CourseMap;
use crate::error::HarvestError;
use crate::extract::collect_courses;
use crate::fetch::DocumentCache;
use crate::filter::syllabus_links;
use reqwest::Client;
use scraper::Html;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

pub const SYLLABUS_URL: &str = "https://www.frcrce.ac.in/index.php/academics/tlp/syllabus";
pub const DOWNLOAD_DIR: &str = "syllabus_pdfs";
pub const OUTPUT_FILE: &str = "final_credits_all.json";

/// One harvesting run: index page -> filtered links -> cached documents ->
/// extracted course records, strictly sequential.
pub struct Harvester {
    client: Client,
    cache: DocumentCache,
    index_url: Url,
}

impl Harvester {
    pub fn new(client: Client, cache: DocumentCache, index_url: Url) -> Self {
        Harvester {
            client,
            cache,
            index_url,
        }
    }

    pub async fn run(&self) -> Result<CourseMap, HarvestError> {
        info!("Fetching syllabus page {}", self.index_url);
        // The only fatal network error of the run; everything after this is
        // skip-and-continue.
        let resp = self.client.get(self.index_url.clone()).send().await?;
        info!("Status code: {}", resp.status());
        let html = resp.text().await?;

        let links = {
            let doc = Html::parse_document(&html);
            syllabus_links(&doc, &self.index_url)
        };
        info!("{} candidate links after filtering", links.len());

        let mut courses = CourseMap::new();
        for url in links {
            let path = match self.cache.fetch(&self.client, &url).await {
                Ok(Some(path)) => path,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Failed to download {}: {}", url, e);
                    continue;
                }
            };

            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown.pdf")
                .to_string();
            info!("Processing {}...", filename);
            match pdf_extract::extract_text(&path) {
                Ok(text) => {
                    let added = collect_courses(&text, &filename, &mut courses);
                    info!("  {} new records from {}", added, filename);
                }
                Err(e) => warn!("Error reading {}: {}", filename, e),
            }
        }

        info!("Total key-value pairs extracted: {}", courses.len());
        Ok(courses)
    }
}

pub fn write_output(courses: &CourseMap, path: impl AsRef<Path>) -> Result<(), HarvestError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, courses)?;
    Ok(())
}
