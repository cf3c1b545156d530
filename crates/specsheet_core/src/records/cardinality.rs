//! Element cardinality.

use serde::Serialize;

/// Cardinality of an element or parameter.
///
/// The text form is derived from the endpoints and recomputed whenever one
/// of them changes. An unset minimum reads as `0` and an unset maximum as
/// `*`, so a default cardinality is `0..*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cardinality {
    min: Option<u32>,
    max: Option<u32>,
    text: String,
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Cardinality {
    pub fn new(min: Option<u32>, max: Option<u32>) -> Self {
        let mut cardinality = Self {
            min,
            max,
            text: String::new(),
        };
        cardinality.refresh();
        cardinality
    }

    /// Parse `min..max`, where `max` may be `*`.
    pub fn parse(text: &str) -> Result<Self, String> {
        let (min, max) = text
            .trim()
            .split_once("..")
            .ok_or_else(|| "expected min..max".to_string())?;

        let min = min
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("minimum '{}' is not a non-negative integer", min.trim()))?;

        let max = match max.trim() {
            "*" => None,
            bound => Some(
                bound
                    .parse::<u32>()
                    .map_err(|_| format!("maximum '{}' is not a non-negative integer or *", bound))?,
            ),
        };

        if let Some(max) = max {
            if min > max {
                return Err(format!("minimum {} exceeds maximum {}", min, max));
            }
        }

        Ok(Self::new(Some(min), max))
    }

    pub fn min(&self) -> Option<u32> {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }

    pub fn set_min(&mut self, min: Option<u32>) {
        self.min = min;
        self.refresh();
    }

    pub fn set_max(&mut self, max: Option<u32>) {
        self.max = max;
        self.refresh();
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn refresh(&mut self) {
        let min = self.min.map_or_else(|| "0".to_string(), |m| m.to_string());
        let max = self.max.map_or_else(|| "*".to_string(), |m| m.to_string());
        self.text = format!("{}..{}", min, max);
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_to_many() {
        let card = Cardinality::new(Some(0), None);
        assert_eq!(card.as_str(), "0..*");
    }

    #[test]
    fn test_exactly_one() {
        let card = Cardinality::new(Some(1), Some(1));
        assert_eq!(card.as_str(), "1..1");
    }

    #[test]
    fn test_unset_minimum_uses_default() {
        // An unset minimum renders as 0, not as an empty string.
        let card = Cardinality::new(None, Some(1));
        assert_eq!(card.as_str(), "0..1");
        assert_eq!(Cardinality::default().as_str(), "0..*");
    }

    #[test]
    fn test_setters_recompute_text() {
        let mut card = Cardinality::default();
        card.set_min(Some(1));
        assert_eq!(card.to_string(), "1..*");
        card.set_max(Some(3));
        assert_eq!(card.as_str(), "1..3");
        card.set_max(None);
        assert_eq!(card.as_str(), "1..*");
        assert!(card.is_unbounded());
    }

    #[test]
    fn test_parse() {
        let card = Cardinality::parse(" 0..* ").unwrap();
        assert_eq!((card.min(), card.max()), (Some(0), None));

        let card = Cardinality::parse("1..1").unwrap();
        assert_eq!((card.min(), card.max()), (Some(1), Some(1)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Cardinality::parse("1").is_err());
        assert!(Cardinality::parse("a..1").is_err());
        assert!(Cardinality::parse("0..n").is_err());
        assert!(Cardinality::parse("2..1").is_err());
    }
}
