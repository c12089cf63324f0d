//! Sentiment Classifier - Keyword-membership mood heuristic
//!
//! Each keyword set scores one point per keyword found as a substring of the
//! lower-cased text (repeats of the same keyword count once). The highest
//! scoring set wins; ties go to the set listed first.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Mood, SentimentAnalysis};

/// One mood and the keywords that vote for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordSet {
    pub mood: Mood,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    fn new(mood: Mood, keywords: &[&str]) -> Self {
        Self {
            mood,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Number of distinct keywords present in already lower-cased text
    fn hits(&self, lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| lower.contains(k.to_lowercase().as_str()))
            .count()
    }
}

/// Keyword tables for classification (configurable)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SentimentConfig {
    /// Keyword sets in tie-break priority order
    pub categories: Vec<KeywordSet>,
    /// Result returned when no keyword matches
    pub fallback: SentimentAnalysis,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                KeywordSet::new(
                    Mood::Happy,
                    &[
                        "happy", "joy", "amazing", "wonderful", "great", "love", "beautiful",
                        "perfect", "excited", "fun",
                    ],
                ),
                KeywordSet::new(
                    Mood::Sad,
                    &[
                        "sad", "terrible", "awful", "horrible", "bad", "worst", "hate",
                        "disappointed", "tragic",
                    ],
                ),
                KeywordSet::new(
                    Mood::Nostalgic,
                    &[
                        "remember", "nostalgia", "childhood", "past", "memories", "miss",
                        "used to", "back then",
                    ],
                ),
                KeywordSet::new(
                    Mood::Excited,
                    &[
                        "excited", "thrilling", "adventure", "amazing", "incredible",
                        "spectacular", "awesome",
                    ],
                ),
            ],
            fallback: SentimentAnalysis {
                mood: Mood::Neutral,
                score: 0.5,
                confidence: 0.3,
            },
        }
    }
}

/// Maps free text to a mood, score and confidence
#[derive(Debug, Clone, Default)]
pub struct SentimentClassifier {
    config: SentimentConfig,
}

impl SentimentClassifier {
    pub fn new(config: Option<SentimentConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }

    /// Classify text. Total and pure: the same text always yields the same result.
    pub fn classify(&self, text: &str) -> SentimentAnalysis {
        let lower = text.to_lowercase();

        let mut best: Option<(Mood, usize)> = None;
        for set in &self.config.categories {
            let hits = set.hits(&lower);
            // strict `>` keeps the earlier set on ties
            if hits > best.map_or(0, |(_, max)| max) {
                best = Some((set.mood, hits));
            }
        }

        let analysis = match best {
            None => self.config.fallback,
            Some((mood, max)) => {
                let max = max as f64;
                SentimentAnalysis {
                    mood,
                    score: max / (max + 1.0),
                    confidence: (max / 3.0).min(1.0),
                }
            }
        };

        tracing::debug!(
            "Classified text as {} (score {:.2}, confidence {:.2})",
            analysis.mood,
            analysis.score,
            analysis.confidence
        );
        analysis
    }
}
