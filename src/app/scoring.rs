// LeadRank - app/scoring.rs
//
// Scoring client: the single network round-trip to the remote scoring
// service. One POST per invocation, a fixed total wait bound, and no
// implicit retry — a user-triggered re-run is the retry mechanism.

use crate::core::model::{Cell, Dataset, Prediction};
use crate::util::constants::MAX_RESPONSE_BYTES;
use crate::util::error::ScoringError;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::io::Read;
use std::time::Duration;

/// Client for the remote lead-scoring service.
///
/// Owns a ureq agent configured with the wait bound; the same client is
/// reused across runs within a session.
pub struct ScoringClient {
    agent: ureq::Agent,
    endpoint: String,
    timeout: Duration,
}

impl ScoringClient {
    /// Create a client for `endpoint` with a total per-request wait bound.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// The configured endpoint address.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Score a cleaned batch: one synchronous POST of the rows as an
    /// ordered JSON array of column→value objects, one prediction back
    /// per row in the same order.
    ///
    /// An empty batch short-circuits to zero predictions without a
    /// network call. Every failure mode maps to a distinct
    /// `ScoringError` variant, including a prediction count that does
    /// not match the row count — that is checked here, before any merge
    /// can see misaligned sequences.
    pub fn score(&self, batch: &Dataset) -> Result<Vec<Prediction>, ScoringError> {
        if batch.is_empty() {
            tracing::debug!("Empty cleaned batch; skipping scoring request");
            return Ok(Vec::new());
        }

        let body = serde_json::to_string(&RowObjects(batch))
            .map_err(|source| ScoringError::Serialize { source })?;

        tracing::info!(
            endpoint = %self.endpoint,
            rows = batch.row_count(),
            "Submitting batch to scoring service"
        );

        let response = match self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .send_string(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response).unwrap_or_default();
                return Err(ScoringError::Status {
                    endpoint: self.endpoint.clone(),
                    code,
                    body: snippet(&body),
                });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(self.map_transport(err));
            }
        };

        let text = read_body_limited(response).map_err(|reason| ScoringError::MalformedBody {
            endpoint: self.endpoint.clone(),
            reason,
        })?;

        parse_predictions(&self.endpoint, &text, batch.row_count())
    }

    /// Split transport failures into timeout vs. everything else, since
    /// the caller surfaces the two differently.
    fn map_transport(&self, err: ureq::Transport) -> ScoringError {
        if is_timeout(&err) {
            ScoringError::Timeout {
                endpoint: self.endpoint.clone(),
                limit_secs: self.timeout.as_secs(),
            }
        } else {
            ScoringError::Transport {
                endpoint: self.endpoint.clone(),
                reason: err.to_string(),
            }
        }
    }
}

/// Walk the transport error's source chain for an I/O timeout.
///
/// Socket timeouts surface as `TimedOut` or `WouldBlock` depending on
/// the platform; anything else stays a transport failure.
fn is_timeout(err: &ureq::Transport) -> bool {
    use std::error::Error as _;
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            return matches!(
                io_err.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            );
        }
        source = cause.source();
    }
    false
}

// ---------------------------------------------------------------------------
// Wire encoding
// ---------------------------------------------------------------------------

/// Serialises a dataset as the scoring request body: an array of
/// row-objects whose keys appear in dataset column order.
///
/// A plain map type would lose the column order, so each row serialises
/// itself against the column list.
struct RowObjects<'a>(&'a Dataset);

impl Serialize for RowObjects<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.rows.len()))?;
        for row in &self.0.rows {
            seq.serialize_element(&RowObject {
                columns: &self.0.columns,
                cells: row,
            })?;
        }
        seq.end()
    }
}

struct RowObject<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Wire decoding
// ---------------------------------------------------------------------------

/// Error-indicator shape some services return instead of predictions.
#[derive(Debug, serde::Deserialize)]
struct ServiceErrorWire {
    error: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

/// Parse a scoring response body.
///
/// Success is an array of prediction objects, one per input row in the
/// same order. An object with an explicit error field is surfaced as a
/// service error; anything else is a malformed body.
fn parse_predictions(
    endpoint: &str,
    body: &str,
    expected: usize,
) -> Result<Vec<Prediction>, ScoringError> {
    let malformed = |reason: String| ScoringError::MalformedBody {
        endpoint: endpoint.to_string(),
        reason,
    };

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(malformed("empty response body".to_string()));
    }

    let value: serde_json::Value =
        serde_json::from_str(trimmed).map_err(|e| malformed(e.to_string()))?;

    if value.is_object() {
        let wire: ServiceErrorWire =
            serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
        return match wire.error.or(wire.detail).or(wire.message) {
            Some(message) => Err(ScoringError::Service {
                endpoint: endpoint.to_string(),
                message,
            }),
            None => Err(malformed(
                "expected an array of predictions, got an object with no error indicator"
                    .to_string(),
            )),
        };
    }

    let predictions: Vec<Prediction> =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

    if predictions.len() != expected {
        return Err(ScoringError::LengthMismatch {
            sent: expected,
            received: predictions.len(),
        });
    }

    Ok(predictions)
}

/// Read a response body with an upper size bound. Oversized or non-UTF-8
/// bodies are reported as a reason string for `MalformedBody`.
fn read_body_limited(response: ureq::Response) -> Result<String, String> {
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_RESPONSE_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| e.to_string())?;
    if bytes.len() > MAX_RESPONSE_BYTES {
        return Err(format!(
            "response body exceeds {MAX_RESPONSE_BYTES} bytes"
        ));
    }
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// First line of a body, truncated, for status-error messages.
fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let line = body.lines().next().unwrap_or("").trim();
    let mut out: String = line.chars().take(MAX).collect();
    if line.chars().count() > MAX {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LeadCategory;

    fn batch() -> Dataset {
        Dataset {
            columns: vec!["zz_last".to_string(), "aa_first".to_string()],
            rows: vec![vec![Cell::Number(1.0), Cell::Text("x".to_string())]],
        }
    }

    #[test]
    fn test_request_body_preserves_column_order() {
        let body = serde_json::to_string(&RowObjects(&batch())).unwrap();
        // Keys must follow dataset order, not alphabetical order.
        let zz = body.find("zz_last").unwrap();
        let aa = body.find("aa_first").unwrap();
        assert!(zz < aa, "column order lost in request body: {body}");
        assert_eq!(body, r#"[{"zz_last":1.0,"aa_first":"x"}]"#);
    }

    #[test]
    fn test_parse_prediction_array() {
        let body = r#"[
            {"lead_score_percent": 90.0, "lead_category": "High"},
            {"lead_score_percent": 40.0, "lead_category": "Medium"}
        ]"#;
        let predictions = parse_predictions("http://svc", body, 2).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].lead_score_percent, 90.0);
        assert_eq!(predictions[1].lead_category, LeadCategory::Medium);
    }

    #[test]
    fn test_length_mismatch_is_caught_before_merge() {
        let body = r#"[{"lead_score_percent": 90.0, "lead_category": "High"}]"#;
        match parse_predictions("http://svc", body, 3) {
            Err(ScoringError::LengthMismatch { sent, received }) => {
                assert_eq!(sent, 3);
                assert_eq!(received, 1);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_error_object_is_a_service_error() {
        let err = parse_predictions("http://svc", r#"{"error": "model not loaded"}"#, 1)
            .unwrap_err();
        match err {
            ScoringError::Service { message, .. } => assert_eq!(message, "model not loaded"),
            other => panic!("expected Service, got {other:?}"),
        }

        let err =
            parse_predictions("http://svc", r#"{"detail": "validation failed"}"#, 1).unwrap_err();
        assert!(matches!(err, ScoringError::Service { .. }));
    }

    #[test]
    fn test_malformed_bodies() {
        assert!(matches!(
            parse_predictions("http://svc", "", 1),
            Err(ScoringError::MalformedBody { .. })
        ));
        assert!(matches!(
            parse_predictions("http://svc", "<html>oops</html>", 1),
            Err(ScoringError::MalformedBody { .. })
        ));
        // Unknown category strings are malformed, never passed through.
        assert!(matches!(
            parse_predictions(
                "http://svc",
                r#"[{"lead_score_percent": 1.0, "lead_category": "Hot"}]"#,
                1
            ),
            Err(ScoringError::MalformedBody { .. })
        ));
        // An object with no error indicator is malformed, not a service error.
        assert!(matches!(
            parse_predictions("http://svc", r#"{"predictions": []}"#, 1),
            Err(ScoringError::MalformedBody { .. })
        ));
    }

    #[test]
    fn test_empty_batch_skips_the_network() {
        // Unroutable endpoint: a request would fail, proving none is made.
        let client = ScoringClient::new("http://192.0.2.1:9", Duration::from_secs(1));
        let empty = Dataset::new(vec!["id".to_string()]);
        assert_eq!(client.score(&empty).unwrap(), Vec::new());
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        assert_eq!(snippet(&long).chars().count(), 201);
        assert_eq!(snippet("short\nsecond line"), "short");
    }
}
