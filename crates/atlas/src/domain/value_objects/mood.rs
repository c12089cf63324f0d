//! Mood - Closed label set assigned to a memory's text

use serde::{Deserialize, Serialize};

/// Mood classification of a memory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Nostalgic,
    Sad,
    Excited,
    #[default]
    Neutral,
}

impl Mood {
    /// All labels, in breakdown order
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Nostalgic,
        Mood::Sad,
        Mood::Excited,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Nostalgic => "nostalgic",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "nostalgic" => Ok(Mood::Nostalgic),
            "sad" => Ok(Mood::Sad),
            "excited" => Ok(Mood::Excited),
            "neutral" => Ok(Mood::Neutral),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// Result of classifying a piece of text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SentimentAnalysis {
    pub mood: Mood,
    /// Strength of the winning category (0.0 - 1.0, never reaches 1.0)
    pub score: f64,
    /// How sure the heuristic is (0.0 - 1.0)
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Nostalgic".parse::<Mood>(), Ok(Mood::Nostalgic));
        assert_eq!(" SAD ".parse::<Mood>(), Ok(Mood::Sad));
        assert!("angry".parse::<Mood>().is_err());
    }

    #[test]
    fn test_display_matches_serde_label() {
        for mood in Mood::ALL {
            let json = serde_json::to_string(&mood).unwrap();
            assert_eq!(json, format!("\"{}\"", mood));
        }
    }
}
