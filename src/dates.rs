use std::borrow::Cow;

use crate::types::BibEntry;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// “02” → “February”; anything else is kept as is.
fn month_name(month: &str) -> &str {
    if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return month;
    }
    match month.parse::<usize>() {
        Ok(n @ 1..=12) => MONTHS[n - 1],
        _ => month,
    }
}

/// “05” → “5”; anything that is not a number is kept as is.
fn day_number(day: &str) -> Cow<'_, str> {
    match day.parse::<u32>() {
        Ok(n) => Cow::Owned(n.to_string()),
        Err(_) => Cow::Borrowed(day),
    }
}

/// Format an ISO-style date like “2024-02-05” as “5 February 2024”.
///
/// Ranges like “2024-02-06/2024-02-08” become “6–8 February 2024”, or
/// “28 February – 2 March 2024” if the months differ. “2024-02” becomes
/// “February 2024”. Anything else is returned verbatim.
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    if let Some((start, end)) = date.split_once('/').filter(|(_, end)| !end.contains('/')) {
        let sp: Vec<&str> = start.split('-').collect();
        let ep: Vec<&str> = end.split('-').collect();
        if sp.len() == 3 && ep.len() == 3 {
            let (sm, em) = (month_name(sp[1]), month_name(ep[1]));
            if sp[1] == ep[1] {
                return format!("{}–{} {} {}", day_number(sp[2]), day_number(ep[2]), sm, sp[0]);
            }
            return format!(
                "{} {} – {} {} {}",
                day_number(sp[2]),
                sm,
                day_number(ep[2]),
                em,
                sp[0]
            );
        }
    }

    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{} {} {}", day_number(day), month_name(month), year),
        [year, month] => format!("{} {}", month_name(month), year),
        _ => date.to_string(),
    }
}

/// The year of an entry: its `year` field, or else the leading year of its `date`.
/// Entries with neither yield the empty string.
pub fn entry_year(entry: &BibEntry) -> &str {
    if let Some(year) = entry.get("year") {
        return year;
    }
    match entry.get("date") {
        Some(date) => date
            .split('-')
            .next()
            .and_then(|s| s.split('/').next())
            .unwrap_or(""),
        None => "",
    }
}
