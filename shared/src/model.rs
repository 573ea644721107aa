use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One facial landmark in image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

// The service emits `{"x":..,"y":..,"z":..}` objects; plain `[x, y, z]`
// triples are accepted as well.
impl<'de> Deserialize<'de> for Landmark {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Point {
                x: f64,
                y: f64,
                #[serde(default)]
                z: f64,
            },
            Triple(f64, f64, f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Point { x, y, z } | Repr::Triple(x, y, z) => Ok(Landmark { x, y, z }),
        }
    }
}

/// Payload returned by `POST /analyze-face`.
///
/// Every field is optional. A recognized field with the wrong JSON shape is
/// dropped (and logged) instead of failing the whole payload, so the renderer
/// can still show whatever did arrive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "landmark_list", skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub distances: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub expressions: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub microexpressions: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub personality_report: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "message_text", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalysisResult {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Analysis-side failure text, if the service reported one.
    pub fn error_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    /// `expressions`, falling back to the legacy `microexpressions` key.
    pub fn expression_map(&self) -> Option<&Map<String, Value>> {
        self.expressions.as_ref().or(self.microexpressions.as_ref())
    }

    /// `attributes`, falling back to `personality_report`.
    pub fn attribute_map(&self) -> Option<&Map<String, Value>> {
        self.attributes.as_ref().or(self.personality_report.as_ref())
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            log::warn!("Ignoring malformed analysis field: {}", e);
            Ok(None)
        }
    }
}

// Bad entries are skipped one by one so the remaining points still count.
fn landmark_list<'de, D>(deserializer: D) -> Result<Option<Vec<Landmark>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Value>> = lenient(deserializer)?;
    let Some(entries) = entries else {
        return Ok(None);
    };

    let landmarks = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(landmark) => Some(landmark),
            Err(e) => {
                log::warn!("Skipping malformed landmark #{}: {}", index, e);
                None
            }
        })
        .collect();
    Ok(Some(landmarks))
}

// Any truthy `message` marks a soft error; non-string values are shown as
// their JSON text.
fn message_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let message = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_object_and_triple_landmarks() {
        let result = AnalysisResult::from_json(
            r#"{"landmarks": [{"x": 120, "y": 88, "z": -0.02}, [1.5, 2.5, 3.5]]}"#,
        )
        .unwrap();

        let landmarks = result.landmarks.unwrap();
        assert_eq!(landmarks[0], Landmark { x: 120.0, y: 88.0, z: -0.02 });
        assert_eq!(landmarks[1], Landmark { x: 1.5, y: 2.5, z: 3.5 });
    }

    #[test]
    fn malformed_landmark_entries_are_skipped() {
        let result = AnalysisResult::from_json(
            r#"{"landmarks": [[1.0, 2.0, 3.0], null, {"x": "left"}, {"x": 4, "y": 5}]}"#,
        )
        .unwrap();

        assert_eq!(
            result.landmarks.unwrap(),
            vec![
                Landmark { x: 1.0, y: 2.0, z: 3.0 },
                Landmark { x: 4.0, y: 5.0, z: 0.0 },
            ]
        );
    }

    #[test]
    fn non_string_message_is_still_an_error() {
        let result = AnalysisResult::from_json(r#"{"message": 42}"#).unwrap();
        assert_eq!(result.error_message(), Some("42"));

        let result = AnalysisResult::from_json(r#"{"message": {"code": "NO_FACE"}}"#).unwrap();
        assert_eq!(result.error_message(), Some(r#"{"code":"NO_FACE"}"#));

        for falsy in ["null", "false", "0"] {
            let result = AnalysisResult::from_json(&format!(r#"{{"message": {}}}"#, falsy)).unwrap();
            assert_eq!(result.error_message(), None, "{falsy}");
        }
    }

    #[test]
    fn malformed_field_is_dropped_not_fatal() {
        let result = AnalysisResult::from_json(
            r#"{"landmarks": "not a list", "distances": {"eye_distance": 61.2}}"#,
        )
        .unwrap();

        assert!(result.landmarks.is_none());
        assert_eq!(result.distances.unwrap()["eye_distance"], 61.2);
    }

    #[test]
    fn expressions_fall_back_to_microexpressions() {
        let result = AnalysisResult::from_json(r#"{"microexpressions": {"neutral": 1.0}}"#).unwrap();
        assert!(result.expression_map().unwrap().contains_key("neutral"));

        let both = AnalysisResult::from_json(
            r#"{"expressions": {}, "microexpressions": {"neutral": 1.0}}"#,
        )
        .unwrap();
        assert!(both.expression_map().unwrap().is_empty());
    }

    #[test]
    fn personality_report_backs_attributes() {
        let result = AnalysisResult::from_json(
            r#"{"personality_report": {"personality_type": "Introverted"}}"#,
        )
        .unwrap();
        assert_eq!(result.attribute_map().unwrap()["personality_type"], "Introverted");
    }

    #[test]
    fn empty_message_is_not_an_error() {
        let result = AnalysisResult::from_json(r#"{"message": ""}"#).unwrap();
        assert_eq!(result.error_message(), None);

        let result = AnalysisResult::from_json(r#"{"message": "No face detected"}"#).unwrap();
        assert_eq!(result.error_message(), Some("No face detected"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result = AnalysisResult::from_json(r#"{"version": "1.0.0", "hostname": "x"}"#).unwrap();
        assert_eq!(result, AnalysisResult::default());
    }
}
