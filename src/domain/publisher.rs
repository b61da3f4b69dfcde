use std::{fmt, str::FromStr};

use crate::domain::InvalidArgument;

/// The role of the party publishing an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Publisher {
    /// The vendor of the affected product.
    Vendor,
    /// The party that discovered the vulnerability.
    Discoverer,
    /// A coordinating body (e.g. a CERT).
    Coordinator,
    /// A user of the affected product.
    User,
    /// Anyone else.
    Other,
}

impl Publisher {
    /// All accepted publisher types.
    pub const ALL: [Self; 5] = [
        Self::Vendor,
        Self::Discoverer,
        Self::Coordinator,
        Self::User,
        Self::Other,
    ];

    /// The capitalised form written to the document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vendor => "Vendor",
            Self::Discoverer => "Discoverer",
            Self::Coordinator => "Coordinator",
            Self::User => "User",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Publisher {
    type Err = InvalidArgument;

    /// Parses a publisher type, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|publisher| publisher.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidArgument::Publisher(s.to_string()))
    }
}
