//! Display formatting for stat values.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const UNITS: [&str; 4] = ["K", "M", "B", "T"];

/// Abbreviate a count for display: `999`, `1.2K`, `12K`, `1.5M`, `2B`.
///
/// One fractional digit at most; a trailing `.0` is dropped.
pub fn abbreviated(value: i64) -> String {
    let magnitude = value.unsigned_abs() as f64;
    if magnitude < 1000.0 {
        return value.to_string();
    }

    let round_tenth = |v: f64| (v * 10.0).round() / 10.0;

    let mut scaled = magnitude / 1000.0;
    let mut unit = 0;
    while round_tenth(scaled) >= 1000.0 && unit + 1 < UNITS.len() {
        scaled /= 1000.0;
        unit += 1;
    }

    let rounded = round_tenth(scaled);
    let number = if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    };
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}{}", sign, number, UNITS[unit])
}

/// Compact age of a past moment: `now`, `5m`, `3h`, `2d`, `4w`, `1y`.
///
/// Moments in the future read as `now`.
pub fn relative_in_past(moment: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - moment).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "now".to_string()
    } else if hours < 1 {
        format!("{}m", minutes)
    } else if days < 1 {
        format!("{}h", hours)
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 365 {
        format!("{}w", days / 7)
    } else {
        format!("{}y", days / 365)
    }
}

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("Invalid entity regex pattern")
});

/// Decode XML/HTML character references in remote text.
///
/// Unknown named entities are left as written.
pub fn decode_xml_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    if let Some(decimal) = entity.strip_prefix('#') {
        return decimal
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }

    let decoded = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_abbreviated_small_numbers_unchanged() {
        assert_eq!(abbreviated(0), "0");
        assert_eq!(abbreviated(999), "999");
        assert_eq!(abbreviated(-42), "-42");
    }

    #[test]
    fn test_abbreviated_units() {
        assert_eq!(abbreviated(1000), "1K");
        assert_eq!(abbreviated(1234), "1.2K");
        assert_eq!(abbreviated(12_000), "12K");
        assert_eq!(abbreviated(12_345), "12.3K");
        assert_eq!(abbreviated(1_500_000), "1.5M");
        assert_eq!(abbreviated(2_000_000_000), "2B");
        assert_eq!(abbreviated(-1500), "-1.5K");
    }

    #[test]
    fn test_abbreviated_rounds_into_next_unit() {
        assert_eq!(abbreviated(999_999), "1M");
        assert_eq!(abbreviated(999_949), "999.9K");
    }

    #[test]
    fn test_relative_in_past() {
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();
        assert_eq!(relative_in_past(now - Duration::seconds(30), now), "now");
        assert_eq!(relative_in_past(now - Duration::minutes(5), now), "5m");
        assert_eq!(relative_in_past(now - Duration::hours(3), now), "3h");
        assert_eq!(relative_in_past(now - Duration::days(2), now), "2d");
        assert_eq!(relative_in_past(now - Duration::days(29), now), "4w");
        assert_eq!(relative_in_past(now - Duration::days(400), now), "1y");
        assert_eq!(relative_in_past(now + Duration::days(1), now), "now");
    }

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(
            decode_xml_entities("Cats &amp; dogs &lt;3 &quot;always&quot;"),
            "Cats & dogs <3 \"always\""
        );
        assert_eq!(decode_xml_entities("What&rsquo;s next"), "What\u{2019}s next");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_xml_entities("It&#8217;s &#x41;"), "It\u{2019}s A");
    }

    #[test]
    fn test_unknown_entities_left_alone() {
        assert_eq!(decode_xml_entities("&bogus; & more"), "&bogus; & more");
    }
}
