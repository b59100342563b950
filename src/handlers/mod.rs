pub mod error;
pub mod patients;
pub mod payments;

use serde::Serialize;

/// Body returned by the write endpoints.
#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub result: bool,
}

/// Parse an optional numeric query bound. Anything that is not a finite
/// number counts as "filter absent", never as an error.
pub(crate) fn numeric_bound(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::numeric_bound;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(numeric_bound(Some("100")), Some(100.0));
        assert_eq!(numeric_bound(Some(" 12.5 ")), Some(12.5));
        assert_eq!(numeric_bound(Some("-3")), Some(-3.0));
    }

    #[test]
    fn ignores_garbage() {
        assert_eq!(numeric_bound(Some("abc")), None);
        assert_eq!(numeric_bound(Some("")), None);
        assert_eq!(numeric_bound(None), None);
    }

    #[test]
    fn ignores_non_finite_values() {
        assert_eq!(numeric_bound(Some("NaN")), None);
        assert_eq!(numeric_bound(Some("inf")), None);
    }
}
