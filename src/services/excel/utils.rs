use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid ISO date regex"));
static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid slash date regex"));

/// True when `s` is shaped like `YYYY-MM-DD` or `DD/MM/YYYY` and names a real
/// calendar day. Slash dates are also accepted month-first (`MM/DD/YYYY`).
pub fn is_date_string(s: &str) -> bool {
    let s = s.trim();

    if let Some(caps) = ISO_DATE.captures(s) {
        let (y, m, d) = (field(&caps, 1), field(&caps, 2), field(&caps, 3));
        return valid_ymd(y, m, d);
    }

    if let Some(caps) = SLASH_DATE.captures(s) {
        let (a, b, y) = (field(&caps, 1), field(&caps, 2), field(&caps, 3));
        return valid_ymd(y, b, a) || valid_ymd(y, a, b);
    }

    false
}

fn field(caps: &regex::Captures<'_>, idx: usize) -> u32 {
    caps.get(idx)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn valid_ymd(year: u32, month: u32, day: u32) -> bool {
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
        .is_some()
}

/// Header name as written, made unique within the sheet. Blank headers are
/// named after their 1-based position; repeats get a numeric suffix.
pub fn unique_header_name(raw: &str, position: usize, existing_names: &mut HashSet<String>) -> String {
    let base_name = if raw.trim().is_empty() {
        format!("column_{}", position + 1)
    } else {
        raw.to_string()
    };

    // If the name already exists, add a numeric suffix
    let mut name = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(name.clone()) {
        name = format!("{}_{}", base_name, counter);
        counter += 1;
    }

    name
}
