// src/schema.rs
//! Wire types for `POST /analyze-sentiment`.

use serde::{Deserialize, Serialize};

use crate::engine::{PolarityScores, COMPOUND};
use crate::sentiment::{Scored, SentimentLabel};

/// One input item. `timestamp` and `stock` are opaque and echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub timestamp: String,
    pub stock: String,
    #[serde(rename = "newsData")]
    pub text: String,
}

/// One output item, positionally matching its `NewsItem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub timestamp: String,
    pub stock: String,
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    pub scores: PolarityScores,
}

impl SentimentResult {
    pub fn new(item: NewsItem, scored: Scored) -> Self {
        Self {
            timestamp: item.timestamp,
            stock: item.stock,
            label: scored.label,
            scores: scored.scores,
        }
    }

    pub fn compound(&self) -> Option<f64> {
        self.scores.get(COMPOUND).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn news_item_reads_news_data_field() {
        let it: NewsItem =
            serde_json::from_value(json!({"timestamp":"t1","stock":"AAPL","newsData":"hi","extra":1}))
                .unwrap();
        assert_eq!(it.text, "hi");
    }

    #[test]
    fn news_item_requires_news_data() {
        let r = serde_json::from_value::<NewsItem>(json!({"timestamp":"t1","stock":"AAPL"}));
        assert!(r.is_err());
    }

    #[test]
    fn result_uses_wire_names() {
        let res = SentimentResult {
            timestamp: "t1".into(),
            stock: "AAPL".into(),
            label: SentimentLabel::Neutral,
            scores: PolarityScores::from([("compound".to_string(), 0.0)]),
        };
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(
            v,
            json!({"timestamp":"t1","stock":"AAPL","sentiment":"neutral","scores":{"compound":0.0}})
        );
    }
}
