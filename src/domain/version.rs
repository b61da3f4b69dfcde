use std::{cmp::Ordering, fmt, str::FromStr};

/// A dotted numeric version token, such as `1.0` or `2.10`.
///
/// Versions compare segment by segment as numbers, so `2.10` is greater than
/// `2.3`. When one version is a prefix of the other the shorter one is
/// smaller (`1` < `1.0`). Segments may be arbitrarily long.
///
/// The original text is kept so that the version can be written back out
/// exactly as it was supplied.
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    /// Digits of each segment with leading zeros removed.
    segments: Vec<String>,
}

impl Version {
    /// Parses a version token.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVersionError`] if the string is empty, has an empty
    /// segment, or contains anything other than ASCII digits and dots.
    pub fn new(text: String) -> Result<Self, InvalidVersionError> {
        let segments = text
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let digits = segment.trim_start_matches('0');
                Some(if digits.is_empty() { "0" } else { digits }.to_string())
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| InvalidVersionError(text.clone()))?;

        Ok(Self { text, segments })
    }

    /// Returns the version exactly as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the numeric segments of the version, without leading zeros.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // without leading zeros, a longer run of digits is the larger number
        self.segments
            .iter()
            .zip(&other.segments)
            .map(|(a, b)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.segments.len().cmp(&other.segments.len()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Version {
    type Err = InvalidVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<&str> for Version {
    type Error = InvalidVersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

/// Error returned when a string is not a dotted numeric version.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid version '{0}': must be dot-separated non-negative integers (e.g. '1.0')")]
pub struct InvalidVersionError(String);
