//! CSV export of the transactions table

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, SecondsFormat};
use shared::Transaction;

use crate::error::{ConsoleError, ConsoleResult};

pub const PAYMENTS_CSV_HEADER: [&str; 8] = [
    "ID",
    "User",
    "Email",
    "Amount",
    "Status",
    "Plan Type",
    "Payment Method",
    "Date",
];

/// `payments-YYYY-MM-DD.csv`
pub fn payments_file_name(date: NaiveDate) -> String {
    format!("payments-{}.csv", date.format("%Y-%m-%d"))
}

/// Quote a field when it contains a delimiter, a quote or a line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let line: Vec<String> = fields.iter().map(|f| escape_field(f.as_ref())).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Render `transactions` as CSV, header first
pub fn payments_csv(transactions: &[Transaction]) -> String {
    let mut out = String::new();
    write_row(&mut out, &PAYMENTS_CSV_HEADER);
    for t in transactions {
        let row = [
            t.id.clone(),
            t.user_name().unwrap_or("N/A").to_string(),
            t.user_email().unwrap_or("N/A").to_string(),
            t.amount.normalize().to_string(),
            t.status.as_str().to_string(),
            t.plan_type.clone().unwrap_or_default(),
            t.payment_method.clone().unwrap_or_default(),
            t.created_at
                .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_default(),
        ];
        write_row(&mut out, &row);
    }
    out
}

/// Write the CSV file into `dir`. An empty list writes nothing.
pub fn export_payments(
    dir: &Path,
    transactions: &[Transaction],
    date: NaiveDate,
) -> ConsoleResult<PathBuf> {
    if transactions.is_empty() {
        return Err(ConsoleError::NothingToExport);
    }
    let path = dir.join(payments_file_name(date));
    std::fs::write(&path, payments_csv(transactions))?;
    tracing::info!(path = %path.display(), rows = transactions.len(), "Payments exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(json: &str) -> Transaction {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(payments_file_name(date), "payments-2025-03-09.csv");
    }

    #[test]
    fn test_rows_and_missing_user() {
        let rows = vec![
            txn(r#"{"_id":"t1","userId":{"name":"John","email":"j@x.com"},"amount":29.99,
                "status":"completed","planType":"pro","paymentMethod":"card",
                "createdAt":"2025-01-05T10:00:00Z"}"#),
            txn(r#"{"_id":"t2","userId":"u9","amount":10,"status":"failed"}"#),
        ];
        let csv = payments_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ID,User,Email,Amount,Status,Plan Type,Payment Method,Date");
        assert_eq!(
            lines[1],
            "t1,John,j@x.com,29.99,completed,pro,card,2025-01-05T10:00:00.000Z"
        );
        assert_eq!(lines[2], "t2,N/A,N/A,10,failed,,,");
    }

    #[test]
    fn test_fields_are_quoted() {
        let rows = vec![txn(
            r#"{"_id":"t3","userId":{"name":"Doe, \"JD\" John"},"amount":1,"status":"pending"}"#,
        )];
        let csv = payments_csv(&rows);
        assert!(csv.contains(r#"t3,"Doe, ""JD"" John",N/A,1,pending"#));
    }

    #[test]
    fn test_empty_list_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err = export_payments(dir.path(), &[], date).unwrap_err();
        assert!(matches!(err, ConsoleError::NothingToExport));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
