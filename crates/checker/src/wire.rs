//! Grammalecte wire format.
//!
//! The checker answers with per-paragraph grammar and spelling error arrays.
//! Both merge into one flat [`CheckMatch`] list; offsets stay in UTF-16 code
//! units of the submitted string, exactly as reported. Anything structurally
//! off (missing fields, inverted ranges, unparseable JSON) degrades to
//! fewer matches rather than an error the caller has to handle.

use core_types::CheckKind;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct GrammalecteResponse {
    #[serde(default)]
    pub data: Vec<GrammalecteParagraph>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GrammalecteParagraph {
    #[serde(default, rename = "lGrammarErrors")]
    pub grammar_errors: Vec<GrammalecteError>,
    #[serde(default, rename = "lSpellingErrors")]
    pub spelling_errors: Vec<GrammalecteError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GrammalecteError {
    #[serde(rename = "nStart")]
    pub start: Option<usize>,
    #[serde(rename = "nEnd")]
    pub end: Option<usize>,
    #[serde(default, rename = "sMessage")]
    pub message: Option<String>,
    #[serde(default, rename = "sRuleId")]
    pub rule_id: Option<String>,
    #[serde(default, rename = "sValue")]
    pub value: Option<String>,
    #[serde(default, rename = "aSuggestions")]
    pub suggestions: Vec<String>,
}

/// One error span in the unified format, offsets in UTF-16 code units of
/// the string that was submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckMatch {
    pub offset: usize,
    pub length: usize,
    pub kind: CheckKind,
    pub message: String,
    pub replacements: Vec<String>,
}

/// Parse a response body. A decode failure surfaces as `Err` so transport
/// code can report it; the caller still proceeds with zero matches.
pub fn parse_response(body: &str) -> Result<Vec<CheckMatch>, serde_json::Error> {
    let response: GrammalecteResponse = serde_json::from_str(body)?;
    Ok(convert(response))
}

pub fn convert(response: GrammalecteResponse) -> Vec<CheckMatch> {
    let mut matches = Vec::new();
    for paragraph in response.data {
        for err in paragraph.grammar_errors {
            push_match(&mut matches, err, CheckKind::Grammar);
        }
        for err in paragraph.spelling_errors {
            push_match(&mut matches, err, CheckKind::Spelling);
        }
    }
    matches
}

fn push_match(out: &mut Vec<CheckMatch>, err: GrammalecteError, kind: CheckKind) {
    let (Some(start), Some(end)) = (err.start, err.end) else {
        return;
    };
    if end < start {
        return;
    }
    let message = match kind {
        CheckKind::Grammar => err
            .message
            .or(err.rule_id)
            .unwrap_or_else(|| "Erreur grammaticale".to_string()),
        CheckKind::Spelling => format!(
            "Faute d'orthographe : {}",
            err.value.as_deref().unwrap_or("")
        ),
    };
    out.push(CheckMatch {
        offset: start,
        length: end - start,
        kind,
        message,
        replacements: err.suggestions,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_error_families_merge_into_one_list() {
        let body = r#"{
            "data": [{
                "lGrammarErrors": [
                    {"nStart": 8, "nEnd": 14, "sMessage": "Accord avec le sujet.", "aSuggestions": ["mange"]}
                ],
                "lSpellingErrors": [
                    {"nStart": 3, "nEnd": 7, "sValue": "chta", "aSuggestions": ["chat"]}
                ]
            }]
        }"#;

        let matches = parse_response(body).unwrap();
        assert_eq!(matches.len(), 2);

        assert_eq!(matches[0].kind, CheckKind::Grammar);
        assert_eq!((matches[0].offset, matches[0].length), (8, 6));
        assert_eq!(matches[0].message, "Accord avec le sujet.");
        assert_eq!(matches[0].replacements, vec!["mange".to_string()]);

        assert_eq!(matches[1].kind, CheckKind::Spelling);
        assert_eq!((matches[1].offset, matches[1].length), (3, 4));
        assert_eq!(matches[1].message, "Faute d'orthographe : chta");
    }

    #[test]
    fn grammar_message_falls_back_to_rule_id_then_default() {
        let body = r#"{"data": [{"lGrammarErrors": [
            {"nStart": 0, "nEnd": 2, "sRuleId": "gv1_accord"},
            {"nStart": 4, "nEnd": 6}
        ]}]}"#;

        let matches = parse_response(body).unwrap();
        assert_eq!(matches[0].message, "gv1_accord");
        assert_eq!(matches[1].message, "Erreur grammaticale");
    }

    #[test]
    fn entries_without_a_range_are_dropped() {
        let body = r#"{"data": [{"lGrammarErrors": [
            {"sMessage": "no range"},
            {"nStart": 5, "sMessage": "no end"},
            {"nStart": 9, "nEnd": 4, "sMessage": "inverted"},
            {"nStart": 1, "nEnd": 3, "sMessage": "kept"}
        ]}]}"#;

        let matches = parse_response(body).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].message, "kept");
    }

    #[test]
    fn empty_and_missing_data_mean_zero_matches() {
        assert!(parse_response("{}").unwrap().is_empty());
        assert!(parse_response(r#"{"data": []}"#).unwrap().is_empty());
        assert!(parse_response(r#"{"data": [{}]}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_bodies_are_a_decode_error() {
        assert!(parse_response("not json").is_err());
        assert!(parse_response(r#"{"data": 3}"#).is_err());
    }
}
