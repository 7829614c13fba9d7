use std::time::Duration;

/// Parse a short duration spec embedded in a query name, e.g. `200ms`,
/// `5s`, `10m`, `1h`. Anything else is "malformed" and returns `None` —
/// callers treat that as "don't touch state, just don't match."
pub fn parse_duration_spec(raw: &str) -> Option<Duration> {
    let raw = raw.trim();

    if let Some(digits) = raw.strip_suffix("ms") {
        return digits.parse::<u64>().ok().map(Duration::from_millis);
    }
    if let Some(digits) = raw.strip_suffix('h') {
        return digits
            .parse::<u64>()
            .ok()
            .map(|hours| Duration::from_secs(hours * 3600));
    }
    if let Some(digits) = raw.strip_suffix('m') {
        return digits
            .parse::<u64>()
            .ok()
            .map(|minutes| Duration::from_secs(minutes * 60));
    }
    if let Some(digits) = raw.strip_suffix('s') {
        return digits.parse::<u64>().ok().map(Duration::from_secs);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration_spec("200ms"), Some(Duration::from_millis(200)));
        assert_eq!(parse_duration_spec("5s"), Some(Duration::from_secs(5)));
        assert_eq!(parse_duration_spec("10m"), Some(Duration::from_secs(600)));
        assert_eq!(parse_duration_spec("1h"), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn rejects_malformed_specs() {
        assert_eq!(parse_duration_spec("safter2times"), None);
        assert_eq!(parse_duration_spec(""), None);
        assert_eq!(parse_duration_spec("abc"), None);
    }
}
