use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of streaming services with a ranking page on the source
/// site. Extending this list means adding a variant and its slug mapping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StreamingService {
    Netflix,
    Disney,
    Hbo,
    AppleTv,
    AmazonPrime,
}

impl StreamingService {
    pub const ALL: [StreamingService; 5] = [
        StreamingService::Netflix,
        StreamingService::Disney,
        StreamingService::Hbo,
        StreamingService::AppleTv,
        StreamingService::AmazonPrime,
    ];

    /// Identifier used in source URLs and page section element ids.
    pub fn slug(&self) -> &'static str {
        match self {
            StreamingService::Netflix => "netflix",
            StreamingService::Disney => "disney",
            StreamingService::Hbo => "hbo",
            StreamingService::AppleTv => "apple-tv",
            StreamingService::AmazonPrime => "amazon-prime",
        }
    }

    /// Capitalized form used in list names and log lines.
    pub fn display_name(&self) -> &'static str {
        match self {
            StreamingService::Netflix => "Netflix",
            StreamingService::Disney => "Disney",
            StreamingService::Hbo => "Hbo",
            StreamingService::AppleTv => "Apple-tv",
            StreamingService::AmazonPrime => "Amazon-prime",
        }
    }

    /// Name of the remote list this service syncs into.
    pub fn list_name(&self) -> String {
        format!("{}-Top10", self.display_name())
    }
}

impl fmt::Display for StreamingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StreamingService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamingService::ALL
            .iter()
            .copied()
            .find(|service| service.slug() == s)
            .ok_or_else(|| format!("unsupported service: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_names_match_remote_convention() {
        assert_eq!(StreamingService::Netflix.list_name(), "Netflix-Top10");
        assert_eq!(StreamingService::AppleTv.list_name(), "Apple-tv-Top10");
    }

    #[test]
    fn slugs_round_trip_through_from_str() {
        for service in StreamingService::ALL {
            assert_eq!(service.slug().parse::<StreamingService>(), Ok(service));
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert!("hulu".parse::<StreamingService>().is_err());
    }
}
