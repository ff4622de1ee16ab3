use chrono::DateTime;

/// Date part (`YYYY-MM-DD`) of an ISO-8601 timestamp, in the timestamp's own offset.
///
/// Bare dates come back unchanged; anything else is cut at the `T` separator.
pub fn date_portion(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    raw.split_once('T')
        .map_or(raw, |(date, _)| date)
        .to_string()
}

/// Earliest of a set of ISO-8601 timestamps, compared as instants.
///
/// Unparseable values only win when nothing parses, and then by text order.
pub fn earliest<'a>(raws: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    raws.into_iter()
        .min_by_key(|raw| match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => (false, Some(dt), *raw),
            Err(_) => (true, None, *raw),
        })
}

/// `2022-01-10T12:00:00Z` -> `2022-01-10 12:00:00`
pub fn display_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.naive_local().format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.replace('T', " ").replace('Z', "")
}
