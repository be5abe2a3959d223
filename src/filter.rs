use crate::data::CandidateLink;
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use url::Url;

const E: &str = "Invalid selector";
lazy_static! {
    static ref A: Selector = Selector::parse("a").expect(E);
}

/// Accept rules: any of these in the link text or href marks a syllabus
/// document candidate.
pub const ACCEPT_KEYWORDS: &[&str] = &["syllabus", "scheme", "curriculum", "portion"];

/// Fallback accept rules: only consulted for document hrefs that matched no
/// keyword. Year-level abbreviations used by the site (first/second/third/
/// final year engineering, plus plain "sem").
pub const SEMESTER_HINTS: &[&str] = &["sem", "fe", "se", "te", "be"];

/// Reject rules. Evaluated after the accept rules and taking precedence over
/// them, so a "Syllabus Committee Report" link stays out.
pub const REJECT_TERMS: &[&str] = &[
    "achievements",
    "placed",
    "student",
    "report",
    "ssr",
    "aqar",
    "committee",
    "calendar",
    "timetable",
    "notice",
];

fn contains_any(text: &str, href: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| text.contains(t) || href.contains(t))
}

fn is_document_href(href: &str) -> bool {
    href.contains("pdf")
}

/// Best-effort classifier for "is this anchor worth downloading as a
/// syllabus document". False positives and negatives are expected; there is
/// no ground truth to validate against short of manual review.
pub fn is_syllabus_candidate(link: &CandidateLink) -> bool {
    let text = link.text.to_lowercase();
    let href = link.href.to_lowercase();

    let accepted = contains_any(&text, &href, ACCEPT_KEYWORDS)
        || (is_document_href(&href) && contains_any(&text, &href, SEMESTER_HINTS));

    accepted && !contains_any(&text, &href, REJECT_TERMS)
}

/// All anchors of a page as (href, display text) pairs, empty and fragment
/// hrefs dropped. Lower-casing happens in classification, not here.
pub fn candidate_links(doc: &Html) -> Vec<CandidateLink> {
    doc.select(&A)
        .filter_map(|a| {
            a.value().attr("href").map(|href| CandidateLink {
                href: href.trim().to_string(),
                text: a.text().collect::<String>().trim().to_string(),
            })
        })
        .filter(|l| !l.href.is_empty() && !l.href.starts_with('#'))
        .collect()
}

/// Accepted candidates resolved against the page base, sorted and deduped.
pub fn syllabus_links(doc: &Html, base: &Url) -> Vec<Url> {
    candidate_links(doc)
        .into_iter()
        .filter(is_syllabus_candidate)
        .filter_map(|l| base.join(&l.href).ok())
        .sorted()
        .dedup()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(text: &str, href: &str) -> CandidateLink {
        CandidateLink {
            href: href.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_keyword_accepts_scheme_pdf() {
        assert!(is_syllabus_candidate(&link(
            "B.E. Syllabus Scheme.pdf",
            "/files/be-syllabus-scheme.pdf"
        )));
    }

    #[test]
    fn test_junk_rejects_placement_report() {
        assert!(!is_syllabus_candidate(&link(
            "Placement Report 2023.pdf",
            "/files/placement-report-2023.pdf"
        )));
    }

    #[test]
    fn test_reject_takes_precedence_over_accept() {
        assert!(!is_syllabus_candidate(&link(
            "Syllabus Committee Minutes",
            "/docs/syllabus-committee.pdf"
        )));
    }

    #[test]
    fn test_semester_hint_needs_document_href() {
        assert!(is_syllabus_candidate(&link("Sem III", "/files/sem3.pdf")));
        assert!(!is_syllabus_candidate(&link("Sem III", "/pages/sem3.html")));
    }

    #[test]
    fn test_plain_document_without_hints_rejected() {
        assert!(!is_syllabus_candidate(&link("Brochure", "/files/brochure.pdf")));
    }

    #[test]
    fn test_keyword_in_href_only() {
        assert!(is_syllabus_candidate(&link("Download", "/academics/curriculum-2024.pdf")));
    }

    #[test]
    fn test_syllabus_links_resolves_and_dedupes() {
        let html = r##"
            <html><body>
                <a href="/files/fe-syllabus.pdf">FE Syllabus</a>
                <a href="/files/fe-syllabus.pdf">FE Syllabus (mirror)</a>
                <a href="https://example.org/se-scheme.pdf">SE Scheme</a>
                <a href="/placement/report.pdf">Placement Report</a>
                <a href="#top">Back to top</a>
            </body></html>
        "##;
        let doc = Html::parse_document(html);
        let base = Url::parse("https://college.example/index.php/academics").unwrap();

        let links = syllabus_links(&doc, &base);
        let links: Vec<&str> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            links,
            vec![
                "https://college.example/files/fe-syllabus.pdf",
                "https://example.org/se-scheme.pdf",
            ]
        );
    }
}
