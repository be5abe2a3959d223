use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One course row recovered from a syllabus document. The course code is the
/// key of the output mapping and is not repeated inside the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub credit: f64,
    pub name: String,
    /// Filename of the document the record was extracted from.
    pub source: String,
}

/// Mapping serialized to the output file, keyed by course code.
/// BTreeMap keeps re-runs byte-identical.
pub type CourseMap = BTreeMap<String, CourseRecord>;

/// An anchor pulled off a page, before any filtering. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub href: String,
    pub text: String,
}

impl fmt::Display for CandidateLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.text, self.href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_serialization_shape() {
        let record = CourseRecord {
            credit: 4.0,
            name: "Data Structures and Algorithms".to_string(),
            source: "scheme_sem3.pdf".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"credit":4.0,"name":"Data Structures and Algorithms","source":"scheme_sem3.pdf"}"#
        );
    }

    #[test]
    fn test_map_serializes_sorted_by_code() {
        let mut map = CourseMap::new();
        map.insert(
            "ECC701".to_string(),
            CourseRecord {
                credit: 3.0,
                name: "Unknown".to_string(),
                source: "a.pdf".to_string(),
            },
        );
        map.insert(
            "25PCC12CE01".to_string(),
            CourseRecord {
                credit: 4.0,
                name: "Unknown".to_string(),
                source: "b.pdf".to_string(),
            },
        );
        let json = serde_json::to_string(&map).unwrap();
        let first = json.find("25PCC12CE01").unwrap();
        let second = json.find("ECC701").unwrap();
        assert!(first < second);
    }
}
