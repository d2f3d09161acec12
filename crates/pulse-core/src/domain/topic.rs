use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of topics a post can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Topic {
    Politics,
    Health,
    Sport,
    Tech,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Politics, Topic::Health, Topic::Sport, Topic::Tech];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Politics => "Politics",
            Topic::Health => "Health",
            Topic::Sport => "Sport",
            Topic::Tech => "Tech",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the known topics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown topic '{0}', expected one of Politics, Health, Sport, Tech")]
pub struct UnknownTopic(pub String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}
