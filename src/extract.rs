use crate::data::{CourseMap, CourseRecord};
use lazy_regex::regex;
use tracing::debug;

/// One line the heuristic accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCourse {
    pub code: String,
    pub name: String,
    pub credit: f64,
}

/// Codes longer than this are table artifacts, not course codes.
const MAX_CODE_LEN: usize = 15;

/// Plausible credit range, exclusive below and inclusive above.
const CREDIT_MIN: f64 = 0.5;
const CREDIT_MAX: f64 = 10.0;

/// Regex heuristic over one document line. A course row is a code token on a
/// word boundary - either the current "25"-prefixed scheme or an older
/// letters-then-digits code like ECC701 - followed by anything, ending in a
/// bare number read as the credit value.
///
/// Every match is treated as ground truth: there is no confidence score, and
/// an incidental "word ... number" line that happens to carry a code-shaped
/// token will be extracted. Footers like "Page 3 of 10" fail the code
/// pattern and are safe.
pub fn parse_course_line(raw: &str) -> Option<ParsedCourse> {
    let line = regex!(r"\s+").replace_all(raw, " ");
    let line = line.trim();

    // The credit token must be preceded by whitespace; a plain \b would let
    // the greedy .* split "1.5" and read the credit as 5.
    let caps = regex!(r"\b(25[A-Z0-9]{5,}|[A-Z]{2,}\d{3,}[A-Z0-9]*)\b.*\s(\d+(?:\.\d+)?)\s*$")
        .captures(line)?;
    let code = caps.get(1)?;
    let credit_token = caps.get(2)?;

    let credit: f64 = credit_token.as_str().parse().ok()?;
    if credit <= CREDIT_MIN || credit > CREDIT_MAX {
        return None;
    }
    if code.as_str().len() > MAX_CODE_LEN {
        return None;
    }

    // The name is whatever sits strictly between the code and the credit.
    let name = line[code.end()..credit_token.start()].trim();
    let name = if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    };

    Some(ParsedCourse {
        code: code.as_str().to_string(),
        name,
        credit,
    })
}

/// Run the line heuristic over a whole document text and merge the hits into
/// `courses`. First occurrence of a code wins; later duplicates in this or
/// any later document are ignored. Returns how many new records were added.
pub fn collect_courses(text: &str, source: &str, courses: &mut CourseMap) -> usize {
    let mut added = 0;
    for line in text.lines() {
        let Some(parsed) = parse_course_line(line) else {
            continue;
        };
        if courses.contains_key(&parsed.code) {
            continue;
        }
        debug!("Found: {} -> {}", parsed.code, parsed.credit);
        courses.insert(
            parsed.code,
            CourseRecord {
                credit: parsed.credit,
                name: parsed.name,
                source: source.to_string(),
            },
        );
        added += 1;
    }
    added
}
