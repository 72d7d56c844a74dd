//! LED coordinate reader (GIFT format).
//!
//! One `x,y,z` record per LED in wiring order. Only the height `z` is used.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::LightsError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse the heights of all LEDs from GIFT CSV text.
///
/// Blank lines are skipped and a leading UTF-8 byte order mark is ignored.
///
/// # Example
/// ```rust
/// use xmaslights::coords::parse_heights;
///
/// let heights = parse_heights("0.1,0.2,-1.5\n-0.3,0.0,2.25\n")?;
/// assert_eq!(heights, vec![-1.5, 2.25]);
/// # Ok::<(), xmaslights::LightsError>(())
/// ```
pub fn parse_heights(content: &str) -> Result<Vec<f64>, LightsError> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut heights = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line() as usize);
            coordinate_error(line, e)
        })?;
        heights.push(parse_record(&record)?);
    }

    Ok(heights)
}

/// Height (`z`) of one `x,y,z` record.
fn parse_record(record: &StringRecord) -> Result<f64, LightsError> {
    let line = record.position().map_or(0, |p| p.line() as usize);
    if record.len() != 3 {
        return Err(LightsError::Coordinates {
            line,
            message: format!("expected 3 values, found {}", record.len()),
        });
    }

    let (x, y, z): (f64, f64, f64) = record
        .deserialize(None)
        .map_err(|e| coordinate_error(line, e))?;

    if let Some(value) = [x, y, z].into_iter().find(|v| !v.is_finite()) {
        return Err(LightsError::Coordinates {
            line,
            message: format!("'{}' is not a finite number", value),
        });
    }
    Ok(z)
}

fn coordinate_error(line: usize, err: csv::Error) -> LightsError {
    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    };
    LightsError::Coordinates { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_z_column() {
        let heights = parse_heights("1,2,3\n4,5,6\n7,8,9").unwrap();
        assert_eq!(heights, vec![3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_byte_order_mark_and_blank_lines() {
        let heights = parse_heights("\u{feff}0.5, 0.5, 1.25\r\n\r\n-0.5,-0.5,0.75\r\n").unwrap();
        assert_eq!(heights, vec![1.25, 0.75]);
    }

    #[test]
    fn test_empty_file_has_no_leds() {
        assert!(parse_heights("").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_column_count() {
        let result = parse_heights("1,2,3\n4,5\n");
        match result {
            Err(LightsError::Coordinates { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("found 2"));
            }
            other => panic!("expected coordinate error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let result = parse_heights("1,2,3\n4,x,6\n");
        assert!(matches!(result, Err(LightsError::Coordinates { line: 2, .. })));
    }

    #[test]
    fn test_whitespace_around_fields() {
        let heights = parse_heights("  1 ,\t2,  3.5  \n").unwrap();
        assert_eq!(heights, vec![3.5]);
    }

    #[test]
    fn test_infinity_rejected() {
        let result = parse_heights("1,2,3\ninf,0,1\n");
        match result {
            Err(LightsError::Coordinates { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("finite"));
            }
            other => panic!("expected coordinate error, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_rejected() {
        let result = parse_heights("1,2,NaN\n");
        assert!(matches!(result, Err(LightsError::Coordinates { line: 1, .. })));
    }
}
