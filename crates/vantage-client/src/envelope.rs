//! Response envelope conventions.
//!
//! Every mutating/administrative response carries a `success` boolean;
//! failure responses carry either `detail` (HTTP-error style) or `error`
//! (application-level). Callers must check both - [`Envelope`] does.

use crate::ApiError;
use serde::Deserialize;
use serde_json::Value;

/// The `success`/`detail`/`error` convention shared by mutating endpoints.
///
/// # Example
///
/// ```
/// use vantage_client::Envelope;
///
/// let body = serde_json::json!({ "success": false, "error": "duplicate name" });
/// let envelope = Envelope::parse(&body);
///
/// assert!(!envelope.success);
/// assert_eq!(envelope.failure.as_deref(), Some("duplicate name"));
/// assert!(envelope.check().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The `success` flag. Absent flags count as failure.
    pub success: bool,

    /// `detail` or `error`, whichever the response carried.
    pub failure: Option<String>,
}

impl Envelope {
    /// Reads the envelope convention out of a response body.
    #[must_use]
    pub fn parse(value: &Value) -> Self {
        let success = value["success"].as_bool().unwrap_or(false);
        let failure = value["detail"]
            .as_str()
            .or_else(|| value["error"].as_str())
            .map(str::to_string);
        Self { success, failure }
    }

    /// Converts a failed envelope into [`ApiError::Application`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Application` when `success` is false, carrying
    /// the failure description (or a placeholder when the response gave
    /// none).
    pub fn check(&self) -> Result<(), ApiError> {
        if self.success {
            return Ok(());
        }
        Err(ApiError::Application(
            self.failure
                .clone()
                .unwrap_or_else(|| "request reported failure without detail".into()),
        ))
    }
}

/// Checks the envelope of a response body, passing the body through on
/// success.
///
/// # Errors
///
/// Returns [`ApiError::Application`] when the envelope reports failure.
pub fn checked(value: Value) -> Result<Value, ApiError> {
    Envelope::parse(&value).check()?;
    Ok(value)
}

/// Status endpoint payload: `{ "count": number }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatusCount {
    /// The reported record count.
    pub count: u64,
}

/// Preview endpoint payload: `{ "success": bool, "records": [...] }` or
/// `{ "success": bool, "modules": [...] }`.
#[derive(Debug, Clone)]
pub struct Preview {
    /// Whether the preview succeeded.
    pub success: bool,

    /// The previewed records (from `records` or `modules`, whichever the
    /// endpoint returns).
    pub records: Vec<Value>,
}

impl Preview {
    /// Reads a preview payload, accepting both field spellings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Application`] when the envelope reports failure.
    pub fn parse(value: &Value) -> Result<Self, ApiError> {
        Envelope::parse(value).check()?;

        let records = value["records"]
            .as_array()
            .or_else(|| value["modules"].as_array())
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            success: true,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_passes() {
        let envelope = Envelope::parse(&json!({ "success": true }));
        assert!(envelope.success);
        assert!(envelope.check().is_ok());
    }

    #[test]
    fn detail_and_error_fields_are_both_checked() {
        let detail = Envelope::parse(&json!({ "success": false, "detail": "http-ish" }));
        assert_eq!(detail.failure.as_deref(), Some("http-ish"));

        let error = Envelope::parse(&json!({ "success": false, "error": "app-ish" }));
        assert_eq!(error.failure.as_deref(), Some("app-ish"));
    }

    #[test]
    fn missing_success_flag_counts_as_failure() {
        let envelope = Envelope::parse(&json!({ "data": [] }));
        assert!(!envelope.success);
        assert!(envelope.check().is_err());
    }

    #[test]
    fn checked_passes_body_through() {
        let value = checked(json!({ "success": true, "id": 7 })).unwrap();
        assert_eq!(value["id"], 7);

        let err = checked(json!({ "success": false, "error": "nope" })).unwrap_err();
        assert!(matches!(err, ApiError::Application(ref msg) if msg == "nope"));
    }

    #[test]
    fn status_count_deserializes() {
        let status: StatusCount = serde_json::from_value(json!({ "count": 42 })).unwrap();
        assert_eq!(status.count, 42);
    }

    #[test]
    fn preview_accepts_records_and_modules() {
        let records =
            Preview::parse(&json!({ "success": true, "records": [{ "id": 1 }] })).unwrap();
        assert_eq!(records.records.len(), 1);

        let modules =
            Preview::parse(&json!({ "success": true, "modules": [{ "id": 1 }, { "id": 2 }] }))
                .unwrap();
        assert_eq!(modules.records.len(), 2);
    }

    #[test]
    fn failed_preview_is_an_application_error() {
        let err = Preview::parse(&json!({ "success": false, "error": "bad archive" }))
            .unwrap_err();
        assert!(matches!(err, ApiError::Application(_)));
    }
}
