//! Generation output parsing for reviewer tasks.
//!
//! Pure functions turning raw model text into typed values. Models often
//! wrap JSON in markdown fences or prose, so both parsers look for the
//! outermost `{ ... }` span before deserializing.
//!
//! | Function | Wire shape | On failure |
//! |----------|------------|------------|
//! | [`parse_verdict`] | `{"issues_found": .., "problematic_text": .., "observation": .., "recommendation": ..}` | [`Verdict::Error`] |
//! | [`parse_confidence`] | `{"confidence": n}` | `0` |

use super::verdict::{Assessment, Recommendation, Verdict, VerdictError};
use crate::core::string::non_blank;
use crate::rubric::MAX_CONFIDENCE;

/// Slice from the first `{` to the last `}` of `response`, if any.
fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response[start..].rfind('}')?;
    Some(&response[start..start + end + 1])
}

/// Parse a reviewer response into a [`Verdict`].
///
/// Blank strings are treated as absent fields. Anything that does not
/// deserialize into the wire shape yields an error verdict carrying the
/// raw text.
///
/// # Examples
///
/// ```
/// use panel_domain::review::parse_verdict;
///
/// let verdict = parse_verdict(r#"{"issues_found": false, "problematic_text": null,
///     "observation": null, "recommendation": null}"#);
/// assert!(verdict.is_null());
///
/// assert!(parse_verdict("I could not decide.").is_error());
/// ```
pub fn parse_verdict(response: &str) -> Verdict {
    let Some(json_str) = extract_json_object(response) else {
        return Verdict::Error(
            VerdictError::new("no JSON object in generation output").with_raw(response),
        );
    };

    match serde_json::from_str::<Assessment>(json_str) {
        Ok(assessment) => Verdict::Assessment(normalize(assessment)),
        Err(e) => Verdict::Error(
            VerdictError::new(format!("malformed verdict: {}", e)).with_raw(response),
        ),
    }
}

fn normalize(assessment: Assessment) -> Assessment {
    let recommendation = assessment.recommendation.filter(|r| match r {
        Recommendation::Other(s) => !s.trim().is_empty(),
        _ => true,
    });

    Assessment {
        issues_found: assessment.issues_found,
        problematic_text: non_blank(assessment.problematic_text),
        observation: non_blank(assessment.observation),
        recommendation,
    }
}

/// Parse a self-evaluation response into a confidence score.
///
/// Fractional scores are truncated, out-of-range scores are clamped to
/// `0..=100`, and numeric strings are accepted. Returns `0` when no score
/// can be read.
///
/// # Examples
///
/// ```
/// use panel_domain::review::parse_confidence;
///
/// assert_eq!(parse_confidence(r#"{"confidence": 87.9}"#), 87);
/// assert_eq!(parse_confidence(r#"{"confidence": 140}"#), 100);
/// assert_eq!(parse_confidence("very confident"), 0);
/// ```
pub fn parse_confidence(response: &str) -> u8 {
    let Some(json_str) = extract_json_object(response) else {
        return 0;
    };
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(json_str) else {
        return 0;
    };

    let score = match parsed.get("confidence") {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match score {
        Some(score) if score.is_finite() => {
            score.trunc().clamp(0.0, f64::from(MAX_CONFIDENCE)) as u8
        }
        _ => 0,
    }
}
