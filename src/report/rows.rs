//! Row format parsing
//!
//! Reads comma-separated report rows (`Time,Amount,Description[,Name]`) into
//! transactions. The header row is optional and matched case-insensitively.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BasicTransaction, Currency, Entry, PayerTransaction};

/// Transactions parsed from rows, shaped by the rows' column count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRows {
    /// Three columns
    Basic(Vec<BasicTransaction>),
    /// Four columns
    MultiPayer(Vec<PayerTransaction>),
}

impl ParsedRows {
    /// Number of transactions parsed
    pub fn len(&self) -> usize {
        match self {
            Self::Basic(txns) => txns.len(),
            Self::MultiPayer(txns) => txns.len(),
        }
    }

    /// Whether no transactions were parsed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse rows, choosing the transaction shape from the first row's width
///
/// An empty source yields no basic transactions. A first row with neither 3
/// nor 4 columns is an error, as is any later row whose width differs from the
/// first.
pub fn parse_rows<R: Read>(reader: R) -> BudgetResult<ParsedRows> {
    let records = read_records(reader)?;

    match records.width {
        None | Some(3) => Ok(ParsedRows::Basic(entries_from_records(&records)?)),
        Some(4) => Ok(ParsedRows::MultiPayer(entries_from_records(&records)?)),
        Some(count) => Err(BudgetError::UnsupportedColumns {
            count,
            row: records.first_row,
        }),
    }
}

/// Parse rows that are known to hold transactions of shape `T`
pub fn parse_entries<T: Entry, R: Read>(reader: R) -> BudgetResult<Vec<T>> {
    let records = read_records(reader)?;
    match records.width {
        Some(count) if count != T::COLUMNS.len() => Err(BudgetError::UnsupportedColumns {
            count,
            row: records.first_row,
        }),
        _ => entries_from_records(&records),
    }
}

/// Raw records with the header removed
struct Records {
    /// Column count of the first row, header included
    width: Option<usize>,
    first_row: String,
    data: Vec<StringRecord>,
}

fn read_records<R: Read>(reader: R) -> BudgetResult<Records> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Records {
        width: None,
        first_row: String::new(),
        data: Vec::new(),
    };

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            let location = match e.position() {
                Some(pos) => format!("line {}", pos.line()),
                None => format!("record {}", idx + 1),
            };
            BudgetError::malformed_row(location, format!("unreadable row: {}", e))
        })?;

        if idx == 0 {
            let record = strip_bom(record);
            records.width = Some(record.len());
            records.first_row = join_record(&record);
            if !is_header(&record) {
                records.data.push(record);
            }
            continue;
        }

        records.data.push(record);
    }

    Ok(records)
}

fn entries_from_records<T: Entry>(records: &Records) -> BudgetResult<Vec<T>> {
    records.data.iter().map(entry_from_record::<T>).collect()
}

fn entry_from_record<T: Entry>(record: &StringRecord) -> BudgetResult<T> {
    let fields: Vec<&str> = record.iter().collect();

    if fields.len() != T::COLUMNS.len() {
        return Err(BudgetError::malformed_row(
            join_record(record),
            format!(
                "expected {} columns, found {}",
                T::COLUMNS.len(),
                fields.len()
            ),
        ));
    }

    let amount = Currency::parse(fields[1])
        .map_err(|e| BudgetError::malformed_row(join_record(record), e.to_string()))?;

    Ok(T::from_columns(fields[0], amount, fields[2], &fields[3..]))
}

/// Drop a UTF-8 byte order mark from the start of the first field
fn strip_bom(record: StringRecord) -> StringRecord {
    if !record.get(0).is_some_and(|field| field.starts_with('\u{feff}')) {
        return record;
    }

    let mut stripped = StringRecord::new();
    for (idx, field) in record.iter().enumerate() {
        if idx == 0 {
            stripped.push_field(field.trim_start_matches('\u{feff}'));
        } else {
            stripped.push_field(field);
        }
    }
    stripped
}

/// Whether a record is the `Time,Amount,Description[,Name]` header
fn is_header(record: &StringRecord) -> bool {
    let expected: &[&str] = match record.len() {
        3 => BasicTransaction::COLUMNS,
        4 => PayerTransaction::COLUMNS,
        _ => return false,
    };

    record
        .iter()
        .zip(expected)
        .all(|(field, column)| field.trim().eq_ignore_ascii_case(column))
}

fn join_record(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

/// Escape a string for CSV format
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_rows() {
        let rows = "1,500.00,Income\n2,-25.00,Groceries\n3,-200.00,Rent";
        let parsed = parse_rows(rows.as_bytes()).unwrap();

        match parsed {
            ParsedRows::Basic(txns) => {
                assert_eq!(txns.len(), 3);
                assert_eq!(txns[0], BasicTransaction::new("1", Currency::from_cents(50000), "Income"));
                assert_eq!(txns[2].amount.cents(), -20000);
            }
            other => panic!("expected basic rows, got {:?}", other),
        }
    }

    #[test]
    fn test_header_is_skipped_case_insensitively() {
        let rows = "TIME,amount,Description\n1,5,Tip";
        let parsed = parse_rows(rows.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_header_after_byte_order_mark() {
        let rows = "\u{feff}Time,Amount,Description\n1,5.00,Tip";
        let parsed = parse_rows(rows.as_bytes()).unwrap();
        assert_eq!(
            parsed,
            ParsedRows::Basic(vec![BasicTransaction::new("1", Currency::from_cents(500), "Tip")])
        );

        let parsed = parse_rows("\u{feff}1,5.00,Tip".as_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_unreadable_row_reports_physical_line() {
        let mut rows = b"1,5.00,\"Two\nlines\"\n2,".to_vec();
        rows.extend_from_slice(b"\xff,Bad");

        let err = parse_rows(rows.as_slice()).unwrap_err();
        assert!(matches!(err, BudgetError::MalformedRow { ref row, .. } if row == "line 3"));
    }

    #[test]
    fn test_digit_separators_are_rejected() {
        let err = parse_rows("1,1_000.00,A".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed row '1,1_000.00,A': invalid amount '1_000.00'"
        );
    }

    #[test]
    fn test_parse_payer_rows() {
        let rows = "Time,Amount,Description,Name\n1,12.5,Lunch,Alice";
        let parsed = parse_rows(rows.as_bytes()).unwrap();

        assert_eq!(
            parsed,
            ParsedRows::MultiPayer(vec![PayerTransaction::new(
                "1",
                Currency::from_cents(1250),
                "Lunch",
                "Alice"
            )])
        );
    }

    #[test]
    fn test_header_only_keeps_shape() {
        let parsed = parse_rows("Time,Amount,Description,Name".as_bytes()).unwrap();
        assert_eq!(parsed, ParsedRows::MultiPayer(Vec::new()));

        let parsed = parse_rows("".as_bytes()).unwrap();
        assert_eq!(parsed, ParsedRows::Basic(Vec::new()));
    }

    #[test]
    fn test_invalid_amount_names_row() {
        let rows = "1,500.00,Income\n2,lots,Groceries";
        let err = parse_rows(rows.as_bytes()).unwrap_err();

        assert!(err.is_malformed_row());
        assert_eq!(
            err.to_string(),
            "Malformed row '2,lots,Groceries': invalid amount 'lots'"
        );
    }

    #[test]
    fn test_unsupported_column_count() {
        let err = parse_rows("1,2".as_bytes()).unwrap_err();
        assert!(matches!(err, BudgetError::UnsupportedColumns { count: 2, .. }));

        let err = parse_rows("1,2,3,4,5".as_bytes()).unwrap_err();
        assert!(matches!(err, BudgetError::UnsupportedColumns { count: 5, .. }));
    }

    #[test]
    fn test_inconsistent_row_width() {
        let rows = "1,500.00,Income\n2,-25.00,Groceries,Bob";
        let err = parse_rows(rows.as_bytes()).unwrap_err();
        assert!(matches!(err, BudgetError::MalformedRow { .. }));
    }

    #[test]
    fn test_quoted_fields() {
        let rows = "1,-3.00,\"Coffee, large\"";
        let parsed = parse_rows(rows.as_bytes()).unwrap();
        match parsed {
            ParsedRows::Basic(txns) => assert_eq!(txns[0].description, "Coffee, large"),
            other => panic!("expected basic rows, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_entries_checks_shape() {
        let txns: Vec<BasicTransaction> = parse_entries("1,5,Tip".as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);

        let err = parse_entries::<PayerTransaction, _>("1,5,Tip".as_bytes()).unwrap_err();
        assert!(matches!(err, BudgetError::UnsupportedColumns { count: 3, .. }));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
