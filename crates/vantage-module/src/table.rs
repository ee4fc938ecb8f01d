//! List-panel table interface.
//!
//! Panels that render record tables implement [`TableModel`] instead of
//! subclassing a shared base panel. The shared flow logic lives in free
//! functions parameterized by the interface - see [`build_rows`].

use serde_json::Value;

/// The per-panel table description.
///
/// # Example
///
/// ```
/// use vantage_module::{build_rows, TableModel};
/// use serde_json::{json, Value};
///
/// struct UserTable;
///
/// impl TableModel for UserTable {
///     fn column_count(&self) -> usize { 2 }
///     fn headers(&self) -> Vec<String> {
///         vec!["Username".into(), "Admin".into()]
///     }
///     fn render_row(&self, record: &Value) -> Vec<String> {
///         vec![
///             record["username"].as_str().unwrap_or("-").to_string(),
///             record["is_admin"].as_bool().unwrap_or(false).to_string(),
///         ]
///     }
/// }
///
/// let rows = build_rows(&UserTable, &[json!({ "username": "analyst" })]);
/// assert_eq!(rows[0], vec!["analyst".to_string(), "false".to_string()]);
/// ```
pub trait TableModel {
    /// Number of columns this panel renders.
    fn column_count(&self) -> usize;

    /// Column headers, in render order.
    fn headers(&self) -> Vec<String>;

    /// Renders one record into its cells.
    fn render_row(&self, record: &Value) -> Vec<String>;
}

/// Renders records through a table model, normalizing every row to the
/// model's column count (short rows are padded, long rows truncated) so a
/// misbehaving panel cannot skew the shared table layout.
#[must_use]
pub fn build_rows(model: &dyn TableModel, records: &[Value]) -> Vec<Vec<String>> {
    let columns = model.column_count();

    records
        .iter()
        .map(|record| {
            let mut row = model.render_row(record);
            row.truncate(columns);
            while row.len() < columns {
                row.push(String::new());
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Sloppy;

    impl TableModel for Sloppy {
        fn column_count(&self) -> usize {
            3
        }

        fn headers(&self) -> Vec<String> {
            vec!["A".into(), "B".into(), "C".into()]
        }

        fn render_row(&self, record: &Value) -> Vec<String> {
            // Deliberately wrong width depending on the record.
            match record["width"].as_u64() {
                Some(n) => (0..n).map(|i| i.to_string()).collect(),
                None => Vec::new(),
            }
        }
    }

    #[test]
    fn rows_are_normalized_to_column_count() {
        let rows = build_rows(
            &Sloppy,
            &[json!({ "width": 1 }), json!({ "width": 5 }), json!({})],
        );

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 3));
        assert_eq!(rows[0], vec!["0".to_string(), String::new(), String::new()]);
        assert_eq!(rows[1], vec!["0".to_string(), "1".into(), "2".into()]);
    }

    #[test]
    fn empty_record_set_builds_no_rows() {
        assert!(build_rows(&Sloppy, &[]).is_empty());
    }
}
