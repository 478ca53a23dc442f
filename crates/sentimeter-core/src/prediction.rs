// Prediction wire types and confidence-to-percentage conversion.

use serde::{Deserialize, Serialize};

/// Request body sent to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub text: String,
}

/// Response body returned by the prediction endpoint.
///
/// Expected shape: `{ "sentiment": "positive" | "negative", "confidence": 0.0..=1.0 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub sentiment: String,
    pub confidence: f64,
}

/// Which side of the scale the service's confidence applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Anything other than `"positive"` scores as negative.
    pub fn from_label(label: &str) -> Self {
        if label == "positive" {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

/// A rendered prediction: display label plus the two bar percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Service label with its first character upper-cased ("Positive").
    pub label: String,
    pub polarity: Polarity,
    /// Percentage in `[0, 100]`.
    pub positive_score: f64,
    /// Percentage in `[0, 100]`.
    pub negative_score: f64,
}

impl PredictionResult {
    /// Convert a service response into bar percentages.
    ///
    /// Returns `None` when the response carries an empty sentiment label.
    pub fn from_response(response: &PredictionResponse) -> Option<Self> {
        if response.sentiment.is_empty() {
            return None;
        }

        let polarity = Polarity::from_label(&response.sentiment);
        let (positive, negative) = split_scores(polarity, response.confidence);

        Some(PredictionResult {
            label: capitalize_first(&response.sentiment),
            polarity,
            positive_score: positive,
            negative_score: negative,
        })
    }

    /// Summary line shown above the bars.
    pub fn summary(&self) -> String {
        format!("The overall sentiment is {}", self.label)
    }
}

/// Split a confidence into `(positive, negative)` percentages, each clamped
/// to `[0, 100]`.
pub fn split_scores(polarity: Polarity, confidence: f64) -> (f64, f64) {
    let primary = confidence * 100.0;
    let secondary = 100.0 - primary;
    let (positive, negative) = match polarity {
        Polarity::Positive => (primary, secondary),
        Polarity::Negative => (secondary, primary),
    };
    (clamp_percent(positive), clamp_percent(negative))
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Bar label with one decimal place ("Positive: 82.0%").
pub fn format_bar_label(name: &str, percent: f64) -> String {
    format!("{name}: {percent:.1}%")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
