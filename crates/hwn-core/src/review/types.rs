use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{domain::Timestamp, errors::Error};

/// Review status of a submission. The vocabulary is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Status value as sent by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Human-readable verdict shown in the chat.
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for Verdict {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| Error::schema(format!("unknown status: {s}")))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated submission record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub verdict: Verdict,
}

/// A validated review API response.
///
/// Records stay raw here; each one is checked only when it is translated.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewSnapshot {
    pub homeworks: Vec<Value>,
    pub current_date: Timestamp,
}

impl ReviewSnapshot {
    /// The API orders submissions newest first.
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}
