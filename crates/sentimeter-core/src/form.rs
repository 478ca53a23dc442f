// Text analysis form: the state machine behind the sentimeter screen.
//
// The form owns the raw field content, the derived stats, and the display
// surface the TUI renders. Every interaction arrives as a `FormEvent`;
// `handle` mutates the state and returns the `Effect`s the orchestrator must
// carry out (dispatch a request, show an alert, schedule a deferred
// recompute). The form itself never performs I/O.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::prediction::{format_bar_label, Polarity, PredictionResult};
use crate::text::{format_char_count, format_word_count, measure, InputPolicy, Stats};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ANALYZE_LABEL: &str = "Analyze Sentiment";
pub const ANALYZING_LABEL: &str = "Analyzing...";
pub const SUMMARY_PLACEHOLDER: &str = "Your sentiment will appear here";
pub const EMPTY_INPUT_ALERT: &str = "Please enter some text to analyze";
pub const FAILURE_ALERT: &str = "Failed to analyze sentiment. Please try again.";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why an analyze attempt produced no result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzeError {
    #[error("no text provided")]
    EmptyInput,

    #[error("sentiment analysis request failed with status {status}")]
    Request { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
}

impl AnalyzeError {
    /// The alert text shown to the user. Request, transport, and parse
    /// failures all share one message.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalyzeError::EmptyInput => EMPTY_INPUT_ALERT,
            _ => FAILURE_ALERT,
        }
    }
}

// ---------------------------------------------------------------------------
// Display surface
// ---------------------------------------------------------------------------

/// One percentage bar: its text label and proportional width.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub label: String,
    /// Width as a percentage of the available bar area, `[0, 100]`.
    pub width_percent: f64,
}

impl ScoreBar {
    fn empty(name: &str) -> Self {
        ScoreBar {
            label: format_bar_label(name, 0.0),
            width_percent: 0.0,
        }
    }

    fn filled(name: &str, percent: f64) -> Self {
        ScoreBar {
            label: format_bar_label(name, percent),
            width_percent: percent,
        }
    }
}

/// The analyze button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    pub enabled: bool,
    pub label: &'static str,
}

/// Everything the screen shows, as last written by the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDisplay {
    /// Authoritative text field content.
    pub text: String,
    pub word_count_label: String,
    pub char_count_label: String,
    pub trigger: TriggerControl,
    pub results_visible: bool,
    pub summary: String,
    /// Polarity of the shown result, `None` while the placeholder is up.
    pub summary_polarity: Option<Polarity>,
    pub positive_bar: ScoreBar,
    pub negative_bar: ScoreBar,
}

impl Default for FormDisplay {
    fn default() -> Self {
        FormDisplay::new(&InputPolicy::default())
    }
}

impl FormDisplay {
    /// Placeholder display for an empty field under `policy`.
    pub fn new(policy: &InputPolicy) -> Self {
        FormDisplay {
            text: String::new(),
            word_count_label: format_word_count(0),
            char_count_label: format_char_count(0, policy.max_chars),
            trigger: TriggerControl {
                enabled: false,
                label: ANALYZE_LABEL,
            },
            results_visible: false,
            summary: SUMMARY_PLACEHOLDER.to_string(),
            summary_polarity: None,
            positive_bar: ScoreBar::empty("Positive"),
            negative_bar: ScoreBar::empty("Negative"),
        }
    }
}

// ---------------------------------------------------------------------------
// Events and effects
// ---------------------------------------------------------------------------

/// A single keystroke-level edit of the text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    Clear,
}

/// Input to the form state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Edit(EditOp),
    /// Pasted content. Stats are recomputed on the following `Recompute`.
    Paste(String),
    /// Deferred stats recomputation scheduled by a paste.
    Recompute,
    AnalyzeRequested,
    PredictionSettled {
        generation: u64,
        outcome: Result<PredictionResult, AnalyzeError>,
    },
}

/// Work the orchestrator must perform on the form's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Feed `FormEvent::Recompute` back after the current step completes.
    ScheduleRecompute,
    /// Send `text` to the prediction service, tagged with `generation`.
    Dispatch { generation: u64, text: String },
    /// Show a blocking alert.
    Alert(String),
}

// ---------------------------------------------------------------------------
// TextAnalysisForm
// ---------------------------------------------------------------------------

/// Behavior switches for the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    pub policy: InputPolicy,
    /// Drop results for requests that were dispatched before a later edit.
    pub discard_stale_results: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        FormOptions {
            policy: InputPolicy::default(),
            discard_stale_results: true,
        }
    }
}

pub struct TextAnalysisForm {
    options: FormOptions,
    raw: String,
    stats: Stats,
    display: FormDisplay,
    /// Generation of the most recently dispatched request.
    generation: u64,
    in_flight: Option<u64>,
    /// Value of `generation` when the field was last edited. A request
    /// whose generation is `<=` this was sent before the latest edit.
    edited_at_generation: u64,
}

impl Default for TextAnalysisForm {
    fn default() -> Self {
        Self::new(FormOptions::default())
    }
}

impl TextAnalysisForm {
    pub fn new(options: FormOptions) -> Self {
        TextAnalysisForm {
            display: FormDisplay::new(&options.policy),
            options,
            raw: String::new(),
            stats: Stats::default(),
            generation: 0,
            in_flight: None,
            edited_at_generation: 0,
        }
    }

    pub fn display(&self) -> &FormDisplay {
        &self.display
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Apply one event and return the effects it requires.
    pub fn handle(&mut self, event: FormEvent) -> Vec<Effect> {
        match event {
            FormEvent::Edit(op) => {
                self.apply_edit(op);
                self.mark_edited();
                self.update_stats();
                Vec::new()
            }
            FormEvent::Paste(content) => {
                self.raw.push_str(&content);
                self.display.text = self.raw.clone();
                self.mark_edited();
                vec![Effect::ScheduleRecompute]
            }
            FormEvent::Recompute => {
                self.update_stats();
                Vec::new()
            }
            FormEvent::AnalyzeRequested => self.analyze(),
            FormEvent::PredictionSettled {
                generation,
                outcome,
            } => self.settle(generation, outcome),
        }
    }

    fn apply_edit(&mut self, op: EditOp) {
        match op {
            EditOp::Insert(c) => self.raw.push(c),
            EditOp::Backspace => {
                self.raw.pop();
            }
            EditOp::Clear => self.raw.clear(),
        }
    }

    /// Record an edit and invalidate any displayed result.
    fn mark_edited(&mut self) {
        self.edited_at_generation = self.generation;
        self.display.results_visible = false;
        self.display.summary = SUMMARY_PLACEHOLDER.to_string();
        self.display.summary_polarity = None;
        self.display.positive_bar = ScoreBar::empty("Positive");
        self.display.negative_bar = ScoreBar::empty("Negative");
    }

    /// Recompute stats from the raw text, writing back truncated content.
    fn update_stats(&mut self) {
        let policy = self.options.policy;
        let measured = measure(&self.raw, &policy);
        if measured.truncated {
            debug!(
                "Input exceeded {} characters, truncating field content",
                policy.max_chars
            );
            self.raw = measured.sanitized;
        }

        self.stats = measured.stats;
        self.display.text = self.raw.clone();
        self.display.word_count_label = format_word_count(self.stats.word_count);
        self.display.char_count_label = format_char_count(self.stats.char_count, policy.max_chars);
        self.display.trigger.enabled = self.trigger_allowed();
    }

    fn trigger_allowed(&self) -> bool {
        self.in_flight.is_none() && self.options.policy.accepts(self.stats.char_count)
    }

    fn analyze(&mut self) -> Vec<Effect> {
        if let Some(pending) = self.in_flight {
            debug!("Analyze ignored, request {} still in flight", pending);
            return Vec::new();
        }

        let text = measure(&self.raw, &self.options.policy).sanitized;
        if text.is_empty() {
            info!("Analyze requested with empty input");
            return vec![Effect::Alert(AnalyzeError::EmptyInput.user_message().to_string())];
        }

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.display.trigger = TriggerControl {
            enabled: false,
            label: ANALYZING_LABEL,
        };

        info!(
            generation = self.generation,
            chars = text.chars().count(),
            "Dispatching prediction request"
        );
        vec![Effect::Dispatch {
            generation: self.generation,
            text,
        }]
    }

    fn settle(
        &mut self,
        generation: u64,
        outcome: Result<PredictionResult, AnalyzeError>,
    ) -> Vec<Effect> {
        if self.in_flight != Some(generation) {
            debug!(
                "Discarding settlement for unknown request (event gen: {}, in flight: {:?})",
                generation, self.in_flight
            );
            return Vec::new();
        }

        // The trigger is restored on every exit path.
        self.in_flight = None;
        self.display.trigger = TriggerControl {
            enabled: self.trigger_allowed(),
            label: ANALYZE_LABEL,
        };

        match outcome {
            Ok(result) => {
                if self.options.discard_stale_results && generation <= self.edited_at_generation {
                    debug!(
                        "Discarding stale prediction (gen {}), text edited since dispatch",
                        generation
                    );
                    return Vec::new();
                }
                info!(
                    label = %result.label,
                    positive = result.positive_score,
                    negative = result.negative_score,
                    "Prediction received"
                );
                self.show_result(&result);
                Vec::new()
            }
            Err(e) => {
                warn!("Error analyzing sentiment: {}", e);
                vec![Effect::Alert(e.user_message().to_string())]
            }
        }
    }

    fn show_result(&mut self, result: &PredictionResult) {
        self.display.results_visible = true;
        self.display.summary = result.summary();
        self.display.summary_polarity = Some(result.polarity);
        self.display.positive_bar = ScoreBar::filled("Positive", result.positive_score);
        self.display.negative_bar = ScoreBar::filled("Negative", result.negative_score);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
