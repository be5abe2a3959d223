use clap::Parser;
use syllabus_harvester::fetch::build_client;
use syllabus_harvester::probe::probe;
use tracing::warn;

/// List navigation links mentioning the syllabus or academics section on the
/// given pages.
#[derive(Parser, Debug)]
struct Args {
    /// Pages to check
    #[arg(default_value = "https://www.frcrce.ac.in/")]
    urls: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    syllabus_harvester::init_tracing();
    let args = Args::parse();

    let client = build_client()?;
    for url in &args.urls {
        if let Err(e) = probe(&client, url).await {
            warn!("Error fetching {}: {}", url, e);
        }
    }
    Ok(())
}
