use crate::error::HarvestError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Browser User-Agent; the college site serves an error page to plain
/// library agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared client for the prober and the harvester. Certificate verification
/// is off: both the college site and the portal serve broken chains.
pub fn build_client() -> Result<Client, HarvestError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .danger_accept_invalid_certs(true)
        .build()?)
}

/// Same client with a cookie jar, for the login replay. The session lives
/// and dies with the process.
pub fn build_session_client() -> Result<Client, HarvestError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .danger_accept_invalid_certs(true)
        .cookie_store(true)
        .build()?)
}

pub fn is_pdf_content_type(value: Option<&str>) -> bool {
    value.map_or(false, |v| v.contains("application/pdf"))
}

fn is_pdf_response(resp: &Response) -> bool {
    is_pdf_content_type(
        resp.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
    )
}

/// Created-on-demand directory of downloaded documents, keyed by a filename
/// derived from the URL. A file that exists is never re-fetched.
pub struct DocumentCache {
    dir: PathBuf,
}

impl DocumentCache {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, HarvestError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(DocumentCache { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache filename for a resolved URL: the trailing path segment when it
    /// already is a pdf filename, otherwise a digest of the whole URL so the
    /// name is stable across runs.
    pub fn filename_for(url: &Url) -> String {
        let segment = url
            .path_segments()
            .and_then(|mut s| s.next_back())
            .unwrap_or("");
        if segment.to_lowercase().ends_with(".pdf") {
            segment.to_string()
        } else {
            let digest = format!("{:x}", Sha256::digest(url.as_str().as_bytes()));
            format!("doc_{}.pdf", &digest[..16])
        }
    }

    pub fn path_for(&self, url: &Url) -> PathBuf {
        self.dir.join(Self::filename_for(url))
    }

    /// Local path for a document, downloading only when it is not cached
    /// yet. Returns `None` when the server answers with a non-pdf body, in
    /// which case nothing is written.
    pub async fn fetch(&self, client: &Client, url: &Url) -> Result<Option<PathBuf>, HarvestError> {
        let path = self.path_for(url);
        if path.exists() {
            debug!("{} exists, skipping download", path.display());
            return Ok(Some(path));
        }

        info!("Downloading {} ...", url);
        let resp = client.get(url.clone()).send().await?;
        if !is_pdf_response(&resp) {
            warn!(
                "Skipping {}: Content-Type is {:?}",
                url,
                resp.headers().get(CONTENT_TYPE)
            );
            return Ok(None);
        }

        let bytes = resp.bytes().await?;
        std::fs::write(&path, &bytes)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filename_from_trailing_pdf_segment() {
        let url = Url::parse("https://college.example/files/FE_Syllabus.pdf").unwrap();
        assert_eq!(DocumentCache::filename_for(&url), "FE_Syllabus.pdf");
    }

    #[test]
    fn test_filename_fallback_is_stable_digest() {
        let url = Url::parse("https://college.example/download?id=123").unwrap();
        let first = DocumentCache::filename_for(&url);
        let second = DocumentCache::filename_for(&url);
        assert_eq!(first, second);
        assert!(first.starts_with("doc_"));
        assert!(first.ends_with(".pdf"));
        assert_eq!(first.len(), "doc_".len() + 16 + ".pdf".len());
    }

    #[test]
    fn test_different_urls_get_different_fallback_names() {
        let a = Url::parse("https://college.example/download?id=123").unwrap();
        let b = Url::parse("https://college.example/download?id=124").unwrap();
        assert_ne!(
            DocumentCache::filename_for(&a),
            DocumentCache::filename_for(&b)
        );
    }

    #[test]
    fn test_pdf_content_type_check() {
        assert!(is_pdf_content_type(Some("application/pdf")));
        assert!(is_pdf_content_type(Some("application/pdf; charset=binary")));
        assert!(!is_pdf_content_type(Some("text/html; charset=utf-8")));
        assert!(!is_pdf_content_type(None));
    }
}
