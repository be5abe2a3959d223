use crate::error::HarvestError;
use lazy_static::lazy_static;
use reqwest::header::REFERER;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashMap;
use tracing::{info, warn};
use url::Url;

const E: &str = "Invalid selector";
lazy_static! {
    static ref FORM: Selector = Selector::parse("form").expect(E);
    static ref FIELD: Selector = Selector::parse("input, select").expect(E);
    static ref A: Selector = Selector::parse("a").expect(E);
}

/// The portal has no structured success status; these body substrings are
/// the only signal that the POST landed on the dashboard.
pub const SUCCESS_MARKERS: &[&str] = &["Dashboard", "Logout"];

/// Fields the server rejects the request over when username + date of birth
/// are supplied. Whether this is a stable contract of the portal or an
/// incidental bypass of a misconfigured deployment is unknown; treat it as a
/// brittle integration detail.
const STRIPPED_FIELDS: &[&str] = &["password", "captcha-response"];

/// Query substring of subject detail links on the dashboard.
pub const SUBJECT_TASK: &str = "task=ciedetails";

#[derive(Debug, Clone)]
pub struct PortalCredentials {
    pub username: String,
    /// Day of birth, sent verbatim (the live form expects "10 " with a
    /// trailing space).
    pub dd: String,
    pub mm: String,
    pub yyyy: String,
}

/// First form of the login page: its action plus every named input/select
/// with its default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub action: String,
    pub fields: HashMap<String, String>,
}

pub fn login_form(doc: &Html) -> Option<LoginForm> {
    let form = doc.select(&FORM).next()?;
    let action = form.value().attr("action").unwrap_or("").to_string();

    let mut fields = HashMap::new();
    for field in form.select(&FIELD) {
        if let Some(name) = field.value().attr("name") {
            let value = field.value().attr("value").unwrap_or("");
            fields.insert(name.to_string(), value.to_string());
        }
    }
    Some(LoginForm { action, fields })
}

/// Overwrite the credential-bearing fields and strip the ones the server
/// does not expect alongside them.
pub fn fill_credentials(fields: &mut HashMap<String, String>, creds: &PortalCredentials) {
    fields.insert("username".to_string(), creds.username.clone());
    fields.insert("dd".to_string(), creds.dd.clone());
    fields.insert("mm".to_string(), creds.mm.clone());
    fields.insert("yyyy".to_string(), creds.yyyy.clone());

    for stripped in STRIPPED_FIELDS {
        fields.remove(*stripped);
    }
}

pub fn is_logged_in(body: &str) -> bool {
    SUCCESS_MARKERS.iter().any(|m| body.contains(m))
}

/// Dashboard hrefs pointing at subject detail pages.
pub fn subject_links(doc: &Html, task: &str) -> Vec<String> {
    doc.select(&A)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(task))
        .map(ToString::to_string)
        .collect()
}

/// Crude static-vs-script-rendered check on a subject page: real marks
/// tables carry "Total" rows and "got/total" fractions.
pub fn has_marks_data(body: &str) -> bool {
    body.contains("Total") || body.contains('/')
}

/// Replay the login form and, on success, probe the first subject detail
/// page. Returns whether the session reached the dashboard.
pub async fn run_login(
    client: &Client,
    base: &Url,
    creds: &PortalCredentials,
) -> Result<bool, HarvestError> {
    info!("Fetching login page {}", base);
    let body = client
        .get(base.clone())
        .header(REFERER, base.as_str())
        .send()
        .await?
        .text()
        .await?;

    let form = {
        let doc = Html::parse_document(&body);
        login_form(&doc)
    }
    .ok_or_else(|| HarvestError::NoLoginForm(base.to_string()))?;

    let mut fields = form.fields;
    fill_credentials(&mut fields, creds);

    let post_url = base.join(&form.action)?;
    info!("Posting login to {}", post_url);
    let resp = client
        .post(post_url)
        .header(REFERER, base.as_str())
        .form(&fields)
        .send()
        .await?;
    let final_url = resp.url().clone();
    let body = resp.text().await?;

    if !is_logged_in(&body) {
        warn!("Login did not reach the dashboard, final url: {}", final_url);
        return Ok(false);
    }
    info!("Login succeeded, dashboard url: {}", final_url);

    let subjects = {
        let doc = Html::parse_document(&body);
        subject_links(&doc, SUBJECT_TASK)
    };
    info!("Found {} subject links", subjects.len());

    if let Some(first) = subjects.first() {
        info!("Fetching first subject...");
        let subject_url = base.join(first)?;
        let resp = client
            .get(subject_url)
            .header(REFERER, base.as_str())
            .send()
            .await?;
        info!("Subject page status: {}", resp.status());
        let subject_body = resp.text().await?;
        if has_marks_data(&subject_body) {
            info!("Marks data found in subject page");
        } else {
            warn!("Marks data not found, page is likely script rendered");
        }
    }

    Ok(true)
}
