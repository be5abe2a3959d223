use clap::Parser;
use std::path::PathBuf;
use syllabus_harvester::fetch::{build_client, DocumentCache};
use syllabus_harvester::harvest::{write_output, Harvester, DOWNLOAD_DIR, OUTPUT_FILE, SYLLABUS_URL};
use tracing::info;
use url::Url;

/// Harvest (course code, name, credit) records from syllabus PDFs linked off
/// a college index page.
#[derive(Parser, Debug)]
struct Args {
    /// Index page listing the syllabus documents
    #[arg(long, default_value = SYLLABUS_URL)]
    url: Url,

    /// Directory downloaded documents are cached in
    #[arg(long, default_value = DOWNLOAD_DIR)]
    dir: PathBuf,

    /// Output mapping file
    #[arg(long, default_value = OUTPUT_FILE)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    syllabus_harvester::init_tracing();
    let args = Args::parse();

    let client = build_client()?;
    let cache = DocumentCache::new(&args.dir)?;
    let harvester = Harvester::new(client, cache, args.url);

    let courses = harvester.run().await?;
    write_output(&courses, &args.out)?;
    info!("Saved {} records to {}", courses.len(), args.out.display());

    Ok(())
}
