use clap::Parser;
use syllabus_harvester::fetch::build_session_client;
use syllabus_harvester::login::{run_login, PortalCredentials};
use url::Url;

/// Replay the student portal login form with username + date-of-birth
/// credentials and probe the first subject detail page.
#[derive(Parser, Debug)]
struct Args {
    /// Portal base URL
    #[arg(long, default_value = "https://crce-students.contineo.in/parents/")]
    base: Url,

    /// Portal username
    #[arg(long)]
    username: String,

    /// Day of birth, passed verbatim (the live form expects a trailing
    /// space, e.g. "10 ")
    #[arg(long)]
    dd: String,

    /// Month of birth
    #[arg(long)]
    mm: String,

    /// Year of birth
    #[arg(long)]
    yyyy: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    syllabus_harvester::init_tracing();
    let args = Args::parse();

    let creds = PortalCredentials {
        username: args.username,
        dd: args.dd,
        mm: args.mm,
        yyyy: args.yyyy,
    };

    let client = build_session_client()?;
    run_login(&client, &args.base, &creds).await?;
    Ok(())
}
