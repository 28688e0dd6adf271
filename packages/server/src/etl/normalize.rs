use chrono::NaiveDate;

/// Date layouts accepted in the maintenance snapshot.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Header names are compared trimmed and lower-cased.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Identifiers are stored trimmed and upper-cased.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Trim and title-case free text: the first letter of every alphabetic run is
/// upper-cased, every other letter lower-cased.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// A present field: `None` when absent or blank after trimming.
pub fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

/// Parse a maintenance date, ignoring any trailing time of day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw
        .trim()
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or_default();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
}

/// Parse a blade length in metres. Decimal input is truncated toward zero.
pub fn parse_length(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(whole) = raw.parse::<i32>() {
        return Some(whole);
    }
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return None;
    }
    Some(value.trunc() as i32)
}
