//! Projection of an [`AnalysisResult`] into what the results panel shows.
//!
//! [`render`] is pure: the same payload always yields an equal
//! [`Presentation`], and no field is assumed to exist.

use crate::model::AnalysisResult;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use strum_macros::EnumIter;

pub const ERROR_PANEL_TITLE: &str = "Analysis Error";
pub const NEUTRAL_LABEL: &str = "Neutral";
pub const NO_EXPRESSIONS: &str = "No facial expressions found in the analysis.";
pub const NO_LANDMARKS: &str = "No facial landmarks found in the analysis.";
pub const NO_DISTANCES: &str = "No facial measurements found in the analysis.";
pub const NO_ATTRIBUTES: &str = "No attributes found in the analysis.";

/// Bars shown in the expressions tab; the dominant label still considers all.
pub const MAX_EXPRESSION_BARS: usize = 6;

/// Theme primary, used for expressions without a dedicated color.
pub const DEFAULT_EXPRESSION_COLOR: &str = "#4e4bec";

#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    ErrorPanel { title: &'static str, message: String },
    Report(Report),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summary: ExpressionSummary,
    pub expressions: Section<Vec<ExpressionBar>>,
    pub landmarks: Section<LandmarkSummary>,
    pub distances: Section<Vec<Measurement>>,
    pub attributes: Section<Vec<AttributeRow>>,
}

/// One display category: either something to show or its fixed placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Data(T),
    NoData(&'static str),
}

impl<T> Section<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Section::NoData(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionSummary {
    pub dominant: String,
    pub mood: Mood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Neutral,
}

impl Mood {
    pub fn color(self) -> &'static str {
        match self {
            Mood::Happy => "#4caf50",
            Mood::Sad => "#f44336",
            Mood::Neutral => "#ff9800",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionBar {
    pub label: String,
    pub intensity: f64,
    pub percent: i64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkSummary {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub label: String,
    pub value: String,
    /// Accent hue in degrees for the row's avatar.
    pub hue: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter)]
pub enum ResultTab {
    #[default]
    Expressions,
    Landmarks,
    Measurements,
    Attributes,
}

impl ResultTab {
    pub fn label(self) -> &'static str {
        match self {
            ResultTab::Expressions => "Facial Expressions",
            ResultTab::Landmarks => "Facial Landmarks",
            ResultTab::Measurements => "Facial Measurements",
            ResultTab::Attributes => "Attributes",
        }
    }
}

pub fn render(result: &AnalysisResult) -> Presentation {
    if let Some(message) = result.error_message() {
        return Presentation::ErrorPanel {
            title: ERROR_PANEL_TITLE,
            message: message.to_string(),
        };
    }

    let ranked = rank_expressions(result.expression_map());
    let summary = match ranked.first() {
        Some(top) => ExpressionSummary {
            dominant: top.label.clone(),
            mood: mood_of(&top.label),
        },
        None => ExpressionSummary {
            dominant: NEUTRAL_LABEL.to_string(),
            mood: Mood::Neutral,
        },
    };

    let expressions = if ranked.is_empty() {
        Section::NoData(NO_EXPRESSIONS)
    } else {
        Section::Data(ranked.into_iter().take(MAX_EXPRESSION_BARS).collect())
    };

    let landmarks = match result.landmarks.as_deref() {
        Some(points) if !points.is_empty() => Section::Data(LandmarkSummary {
            count: points.len(),
        }),
        _ => Section::NoData(NO_LANDMARKS),
    };

    let distances = match result.distances.as_ref() {
        Some(map) if !map.is_empty() => Section::Data(
            map.iter()
                .map(|(key, value)| Measurement {
                    label: title_case(key),
                    value: measurement_text(value),
                })
                .collect(),
        ),
        _ => Section::NoData(NO_DISTANCES),
    };

    let attributes = match result.attribute_map() {
        Some(map) if !map.is_empty() => Section::Data(
            map.iter()
                .enumerate()
                .map(|(index, (key, value))| AttributeRow {
                    label: title_case(key),
                    value: attribute_text(value),
                    hue: (index as u32 * 40) % 360,
                })
                .collect(),
        ),
        _ => Section::NoData(NO_ATTRIBUTES),
    };

    Presentation::Report(Report {
        summary,
        expressions,
        landmarks,
        distances,
        attributes,
    })
}

// Highest intensity first; equal intensities keep the order the service sent.
fn rank_expressions(map: Option<&Map<String, Value>>) -> Vec<ExpressionBar> {
    let Some(map) = map else {
        return Vec::new();
    };

    let mut ranked: Vec<ExpressionBar> = map
        .iter()
        .filter_map(|(key, value)| {
            let Some(intensity) = value.as_f64() else {
                log::warn!("Skipping non-numeric expression {:?}: {}", key, value);
                return None;
            };
            Some(ExpressionBar {
                label: capitalize(key),
                intensity,
                percent: (intensity * 100.0).round() as i64,
                color: expression_color(key),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.intensity.partial_cmp(&a.intensity).unwrap_or(Ordering::Equal));
    ranked
}

pub fn expression_color(key: &str) -> &'static str {
    match key.to_lowercase().as_str() {
        "happy" | "joy" => "#4caf50",
        "sad" | "sorrow" => "#f44336",
        "angry" | "anger" => "#d32f2f",
        "surprise" => "#ff9800",
        "disgust" => "#9c27b0",
        "fear" => "#651fff",
        "neutral" => "#607d8b",
        "contempt" => "#795548",
        _ => DEFAULT_EXPRESSION_COLOR,
    }
}

fn mood_of(label: &str) -> Mood {
    let label = label.to_lowercase();
    if label.contains("happy") || label.contains("joy") {
        Mood::Happy
    } else if label.contains("sad") || label.contains("sorrow") || label.contains("anger") {
        Mood::Sad
    } else {
        Mood::Neutral
    }
}

fn measurement_text(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            // Ties round away from zero; `{:.2}` alone rounds them to even.
            Some(f) => format!("{:.2}", (f * 100.0).round() / 100.0),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn attribute_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `eye_distance` -> `Eye Distance`.
pub fn title_case(key: &str) -> String {
    key.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}
