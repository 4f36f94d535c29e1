//! Core data structures for tomb_atlas
//!
//! Artifact records arrive as loosely shaped JSON: several aliases per
//! field, positions as arrays, objects or free text. Each field is decoded
//! by exactly one total function that yields either a canonical value or a
//! [`FieldDecodeError`]; the loader applies the documented fallback on
//! failure and never passes untyped JSON further in.

use std::collections::{BTreeMap, HashSet};
use std::f64::consts::PI;
use std::path::Path;

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::AtlasConfig;
use super::error::{json_kind, AtlasError, FieldDecodeError, Result, ResultExt};

/// Aliases for the artifact identifier, in priority order
pub const ID_FIELDS: &[&str] = &["artifact_id", "id"];

/// Aliases for the scene position, in priority order
pub const POSITION_FIELDS: &[&str] = &["vr_position", "position", "xyz"];

/// Aliases for the per-artifact scale, in priority order
pub const SCALE_FIELDS: &[&str] = &["vr_scale", "scale"];

/// Explicit metadata fields considered for cluster labels, in priority order
pub const EXPLICIT_FIELDS: &[&str] = &[
    "type",
    "category",
    "artifact_type",
    "canonical",
    "canonical_name",
    "normalized_label",
    "specimen",
    "model_name",
];

/// Aliases for the start of a date interval
pub const START_DATE_FIELDS: &[&str] = &["start_date", "date_start", "from"];

/// Aliases for the end of a date interval
pub const END_DATE_FIELDS: &[&str] = &["end_date", "date_end", "to"];

/// Aliases for a single date
pub const SINGLE_DATE_FIELDS: &[&str] = &["date", "diary_date", "date_iso", "excavation_date"];

lazy_static! {
    static ref NUMBER_PATTERN: Regex = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

// =============================================================================
// Position
// =============================================================================

/// A point in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Deterministic placement on a sphere, seeded by the artifact id.
    ///
    /// Same id, same point: reloading a list never moves an artifact
    /// between cells.
    pub fn fallback_for(id: &str, radius: f64, lift: f64) -> Self {
        let digest = md5::compute(id.as_bytes());
        let unit = |bytes: &[u8]| {
            let word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            word as f64 / u32::MAX as f64
        };
        let theta = unit(&digest[0..4]) * 2.0 * PI;
        let phi = unit(&digest[4..8]) * PI;
        Self {
            x: radius * phi.sin() * theta.cos(),
            y: radius * phi.cos() + lift,
            z: radius * phi.sin() * theta.sin(),
        }
    }
}

/// How an artifact's position was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Decoded from the record
    Recorded,
    /// Record had no usable position; fallback sphere was used
    Fallback,
}

/// Every shape a position may take in an artifact record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PositionInput {
    /// `[x, y, z]`
    Components(Vec<Value>),
    /// `{"x": .., "y": .., "z": ..}`
    Named {
        x: Option<Value>,
        y: Option<Value>,
        z: Option<Value>,
    },
    /// `"x y z"`, `"x,y,z"` or any text with three numbers in it
    Text(String),
}

impl PositionInput {
    /// Normalize to a canonical position.
    ///
    /// Arrays and objects default missing components to zero; text needs
    /// three numbers.
    pub fn normalize(&self, field: &str) -> std::result::Result<Position, FieldDecodeError> {
        match self {
            PositionInput::Components(items) => {
                if items.is_empty() {
                    return Err(FieldDecodeError::TooFewComponents {
                        field: field.to_string(),
                        found: 0,
                    });
                }
                let mut coords = [0.0; 3];
                for (slot, item) in coords.iter_mut().zip(items.iter()) {
                    *slot = component(field, Some(item))?;
                }
                Ok(Position::new(coords[0], coords[1], coords[2]))
            }
            PositionInput::Named { x, y, z } => {
                if x.is_none() && y.is_none() && z.is_none() {
                    return Err(FieldDecodeError::TooFewComponents {
                        field: field.to_string(),
                        found: 0,
                    });
                }
                Ok(Position::new(
                    component(field, x.as_ref())?,
                    component(field, y.as_ref())?,
                    component(field, z.as_ref())?,
                ))
            }
            PositionInput::Text(text) => {
                let mut numbers = Vec::with_capacity(3);
                for m in NUMBER_PATTERN.find_iter(text).take(3) {
                    let value = m
                        .as_str()
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| FieldDecodeError::NotANumber {
                            field: field.to_string(),
                            raw: m.as_str().to_string(),
                        })?;
                    numbers.push(value);
                }
                if numbers.len() < 3 {
                    return Err(FieldDecodeError::TooFewComponents {
                        field: field.to_string(),
                        found: numbers.len(),
                    });
                }
                Ok(Position::new(numbers[0], numbers[1], numbers[2]))
            }
        }
    }
}

fn component(field: &str, value: Option<&Value>) -> std::result::Result<f64, FieldDecodeError> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| FieldDecodeError::NotANumber {
            field: field.to_string(),
            raw: n.to_string(),
        }),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FieldDecodeError::NotANumber {
                field: field.to_string(),
                raw: s.clone(),
            }),
        Some(other) => Err(FieldDecodeError::wrong_shape(field, other)),
    }
}

/// Decode a position value.
pub fn decode_position(field: &str, value: &Value) -> std::result::Result<Position, FieldDecodeError> {
    let input: PositionInput = serde_json::from_value(value.clone())
        .map_err(|_| FieldDecodeError::wrong_shape(field, value))?;
    input.normalize(field)
}

// =============================================================================
// Scalar field decoders
// =============================================================================

/// Decode a non-blank text field. Numbers are accepted and stringified.
pub fn decode_text(field: &str, value: &Value) -> std::result::Result<String, FieldDecodeError> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => return Err(FieldDecodeError::missing(field)),
        other => return Err(FieldDecodeError::wrong_shape(field, other)),
    };
    if text.is_empty() {
        return Err(FieldDecodeError::missing(field));
    }
    Ok(text)
}

/// Decode a scale. Non-positive values are reported as missing.
pub fn decode_scale(field: &str, value: &Value) -> std::result::Result<f64, FieldDecodeError> {
    let scale = component(field, Some(value))?;
    if scale > 0.0 {
        Ok(scale)
    } else {
        Err(FieldDecodeError::missing(field))
    }
}

/// Decode a boolean flag; `"true"`/`"false"` strings are accepted.
pub fn decode_flag(field: &str, value: &Value) -> std::result::Result<bool, FieldDecodeError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            _ => Err(FieldDecodeError::wrong_shape(field, value)),
        },
        Value::Null => Ok(false),
        other => Err(FieldDecodeError::wrong_shape(field, other)),
    }
}

/// Decode an explicit metadata value to its normalized form
/// (trimmed, lowercased).
pub fn decode_metadata(field: &str, value: &Value) -> std::result::Result<String, FieldDecodeError> {
    let text = match value {
        Value::String(s) => s.trim().to_lowercase(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => return Err(FieldDecodeError::missing(field)),
        other => return Err(FieldDecodeError::wrong_shape(field, other)),
    };
    if text.is_empty() {
        return Err(FieldDecodeError::missing(field));
    }
    Ok(text)
}

// =============================================================================
// Artifact
// =============================================================================

/// A raw date value, remembered with the alias it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDate {
    pub field: String,
    pub text: String,
}

/// Date values found on a record, grouped by role and kept in alias order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateFields {
    pub start: Vec<RawDate>,
    pub end: Vec<RawDate>,
    pub single: Vec<RawDate>,
}

impl DateFields {
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty() && self.single.is_empty()
    }
}

/// A scanned artifact. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    /// Identifier (also the fallback text for labeling)
    pub id: String,
    /// Scene position
    pub position: Position,
    /// Whether the position was recorded or synthesized
    pub placement: Placement,
    /// Raw positive scale, if the record had one
    pub scale: Option<f64>,
    /// Free-text caption quoting the diary passage
    pub mention: Option<String>,
    /// Diary scan page
    pub source_url: Option<String>,
    /// Canonical reference instance flag
    pub type_specimen: bool,
    /// Normalized explicit metadata, keyed by field name
    pub metadata: BTreeMap<String, String>,
    /// Date values in alias order
    pub dates: DateFields,
}

impl Artifact {
    /// Create an artifact at a recorded position.
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            placement: Placement::Recorded,
            scale: None,
            mention: None,
            source_url: None,
            type_specimen: false,
            metadata: BTreeMap::new(),
            dates: DateFields::default(),
        }
    }

    /// Set the mention text.
    pub fn with_mention(mut self, mention: impl Into<String>) -> Self {
        let mention = mention.into();
        self.mention = if mention.trim().is_empty() {
            None
        } else {
            Some(mention)
        };
        self
    }

    /// Set an explicit metadata field (value is normalized).
    pub fn with_field(mut self, field: &str, value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        if !normalized.is_empty() {
            self.metadata.insert(field.to_string(), normalized);
        }
        self
    }

    /// Add a single-date value.
    pub fn with_date(mut self, field: &str, text: &str) -> Self {
        self.dates.single.push(RawDate {
            field: field.to_string(),
            text: text.to_string(),
        });
        self
    }

    /// Add a start/end pair using the primary aliases.
    pub fn with_interval(mut self, start: &str, end: &str) -> Self {
        self.dates.start.push(RawDate {
            field: START_DATE_FIELDS[0].to_string(),
            text: start.to_string(),
        });
        self.dates.end.push(RawDate {
            field: END_DATE_FIELDS[0].to_string(),
            text: end.to_string(),
        });
        self
    }

    /// Set the source page.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Mark as a type specimen.
    pub fn as_type_specimen(mut self) -> Self {
        self.type_specimen = true;
        self
    }

    /// Text fed to the tokenizer: the mention, or the id.
    pub fn label_text(&self) -> &str {
        self.mention.as_deref().unwrap_or(&self.id)
    }

    /// Normalized value of an explicit metadata field.
    pub fn metadata_value(&self, field: &str) -> Option<&str> {
        self.metadata.get(field).map(String::as_str)
    }

    /// Hover title: mention or id, whitespace collapsed, truncated with an
    /// ellipsis past `max_chars`.
    pub fn display_title(&self, max_chars: usize) -> String {
        let source = self
            .mention
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(if self.id.is_empty() {
                "Unknown"
            } else {
                self.id.as_str()
            });
        let text = WHITESPACE.replace_all(source.trim(), " ").into_owned();
        if max_chars == 0 || text.chars().count() <= max_chars {
            return text;
        }
        let mut truncated: String = text.chars().take(max_chars - 1).collect();
        truncated.push('…');
        truncated
    }

    /// Decode one record of an artifact list.
    ///
    /// Only a non-object record is an error; every field-level failure is
    /// logged and replaced by its fallback.
    pub fn from_record(index: usize, record: &Value, config: &AtlasConfig) -> Result<Self> {
        let fields = record_fields(index, record)?;
        let id = recorded_id(fields).unwrap_or_else(|| synthetic_id(index));
        Ok(Self::decode(id, fields, config))
    }

    fn decode(id: String, fields: &serde_json::Map<String, Value>, config: &AtlasConfig) -> Self {
        let (position, placement) = match first_decoded(fields, POSITION_FIELDS, decode_position) {
            Ok(p) => (p, Placement::Recorded),
            Err(err) => {
                if !matches!(err, FieldDecodeError::Missing { .. }) {
                    warn!("{}: {}; using fallback placement", id, err);
                }
                (
                    Position::fallback_for(&id, config.fallback_radius, config.fallback_lift),
                    Placement::Fallback,
                )
            }
        };

        let scale = first_decoded(fields, SCALE_FIELDS, decode_scale).ok();
        let mention = optional(&id, fields, "mention", decode_text);
        let source_url = optional(&id, fields, "source_url", decode_text);
        let type_specimen = optional(&id, fields, "type_specimen", decode_flag).unwrap_or(false);

        let mut metadata = BTreeMap::new();
        for field in EXPLICIT_FIELDS {
            if let Some(value) = optional(&id, fields, field, decode_metadata) {
                metadata.insert(field.to_string(), value);
            }
        }

        let dates = DateFields {
            start: raw_dates(&id, fields, START_DATE_FIELDS),
            end: raw_dates(&id, fields, END_DATE_FIELDS),
            single: raw_dates(&id, fields, SINGLE_DATE_FIELDS),
        };

        Self {
            id,
            position,
            placement,
            scale,
            mention,
            source_url,
            type_specimen,
            metadata,
            dates,
        }
    }
}

fn record_fields(index: usize, record: &Value) -> Result<&serde_json::Map<String, Value>> {
    record.as_object().ok_or_else(|| {
        AtlasError::invalid_artifact_list(format!(
            "record {} is a {}, expected an object",
            index,
            json_kind(record)
        ))
    })
}

fn recorded_id(fields: &serde_json::Map<String, Value>) -> Option<String> {
    first_decoded(fields, ID_FIELDS, decode_text).ok()
}

fn synthetic_id(index: usize) -> String {
    format!("artifact-{}", index)
}

/// Synthesized id for a record without one, suffixed until it collides
/// with nothing already taken.
fn unused_id(index: usize, taken: &HashSet<String>) -> String {
    let base = synthetic_id(index);
    if !taken.contains(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(base)
}

type Decoder<T> = fn(&str, &Value) -> std::result::Result<T, FieldDecodeError>;

/// Try each alias in order; the first that decodes wins. Reports the first
/// real failure when none succeed, `Missing` when no alias is present.
fn first_decoded<T>(
    fields: &serde_json::Map<String, Value>,
    aliases: &[&str],
    decode: Decoder<T>,
) -> std::result::Result<T, FieldDecodeError> {
    let mut first_err = None;
    for alias in aliases {
        let Some(value) = fields.get(*alias) else {
            continue;
        };
        match decode(alias, value) {
            Ok(v) => return Ok(v),
            Err(FieldDecodeError::Missing { .. }) => {}
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }
    Err(first_err.unwrap_or_else(|| FieldDecodeError::missing(aliases.first().copied().unwrap_or(""))))
}

fn optional<T>(
    id: &str,
    fields: &serde_json::Map<String, Value>,
    field: &str,
    decode: Decoder<T>,
) -> Option<T> {
    let value = fields.get(field)?;
    match decode(field, value) {
        Ok(v) => Some(v),
        Err(FieldDecodeError::Missing { .. }) => None,
        Err(err) => {
            warn!("{}: {}; ignoring", id, err);
            None
        }
    }
}

fn raw_dates(id: &str, fields: &serde_json::Map<String, Value>, aliases: &[&str]) -> Vec<RawDate> {
    aliases
        .iter()
        .filter_map(|alias| {
            let text = optional(id, fields, alias, decode_text)?;
            Some(RawDate {
                field: alias.to_string(),
                text,
            })
        })
        .collect()
}

// =============================================================================
// Artifact list loading
// =============================================================================

/// Parse an artifact list document: a bare array, or `{"artifacts": [...]}`.
pub fn parse_artifact_list(json: &str, config: &AtlasConfig) -> Result<Vec<Artifact>> {
    let document: Value = serde_json::from_str(json)?;
    let records = match &document {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("artifacts") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(AtlasError::invalid_artifact_list(
                    "object document has no 'artifacts' array",
                ))
            }
        },
        other => {
            return Err(AtlasError::invalid_artifact_list(format!(
                "expected an array or an object, found {}",
                json_kind(other)
            )))
        }
    };

    let mut decoded = Vec::with_capacity(records.len());
    let mut taken = HashSet::new();
    for (i, record) in records.iter().enumerate() {
        let fields = record_fields(i, record)?;
        let id = recorded_id(fields);
        if let Some(id) = &id {
            if !taken.insert(id.clone()) {
                warn!("duplicate artifact id '{}' at record {}", id, i);
            }
        }
        decoded.push((fields, id));
    }

    // Every recorded id is taken before any id is synthesized
    let artifacts: Vec<Artifact> = decoded
        .into_iter()
        .enumerate()
        .map(|(i, (fields, id))| {
            let id = id.unwrap_or_else(|| {
                let id = unused_id(i, &taken);
                taken.insert(id.clone());
                id
            });
            Artifact::decode(id, fields, config)
        })
        .collect();

    let fallbacks = artifacts
        .iter()
        .filter(|a| a.placement == Placement::Fallback)
        .count();
    info!(
        "parsed {} artifacts ({} with fallback placement)",
        artifacts.len(),
        fallbacks
    );
    Ok(artifacts)
}

/// Read and parse an artifact list file.
pub fn load_artifact_list(path: &Path, config: &AtlasConfig) -> Result<Vec<Artifact>> {
    if !path.exists() {
        return Err(AtlasError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_artifact_list(&content, config).context(format!("loading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_position_shapes() {
        assert_eq!(
            decode_position("position", &json!([1, 2.5, -3])).unwrap(),
            Position::new(1.0, 2.5, -3.0)
        );
        assert_eq!(
            decode_position("position", &json!({"x": 1, "z": "4"})).unwrap(),
            Position::new(1.0, 0.0, 4.0)
        );
        assert_eq!(
            decode_position("position", &json!("1.5 2 -0.25")).unwrap(),
            Position::new(1.5, 2.0, -0.25)
        );
        assert_eq!(
            decode_position("position", &json!("1,2,3")).unwrap(),
            Position::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_decode_position_short_array_pads_with_zero() {
        assert_eq!(
            decode_position("xyz", &json!([4])).unwrap(),
            Position::new(4.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_decode_position_failures() {
        assert!(matches!(
            decode_position("position", &json!("1 2")),
            Err(FieldDecodeError::TooFewComponents { found: 2, .. })
        ));
        assert!(matches!(
            decode_position("position", &json!([])),
            Err(FieldDecodeError::TooFewComponents { found: 0, .. })
        ));
        assert!(matches!(
            decode_position("position", &json!(["a", 1, 2])),
            Err(FieldDecodeError::NotANumber { .. })
        ));
        assert!(matches!(
            decode_position("position", &json!(true)),
            Err(FieldDecodeError::WrongShape { .. })
        ));
        assert!(matches!(
            decode_position("position", &json!({})),
            Err(FieldDecodeError::TooFewComponents { .. })
        ));
    }

    #[test]
    fn test_decode_position_text_overflow() {
        let huge = "9".repeat(400);
        assert!(matches!(
            decode_position("position", &json!(format!("{} 0 {}", huge, huge))),
            Err(FieldDecodeError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_overflowing_text_position_uses_fallback() {
        let huge = "9".repeat(400);
        let record = json!({"id": "far", "position": format!("{} 0 {}", huge, huge)});
        let artifact = Artifact::from_record(0, &record, &AtlasConfig::default()).unwrap();
        assert_eq!(artifact.placement, Placement::Fallback);
        assert!(artifact.position.x.is_finite() && artifact.position.z.is_finite());
    }

    #[test]
    fn test_fallback_placement_is_deterministic_and_on_sphere() {
        let a = Position::fallback_for("HUP-1234", 10.0, 1.0);
        let b = Position::fallback_for("HUP-1234", 10.0, 1.0);
        assert_eq!(a, b);
        let r = (a.x * a.x + (a.y - 1.0) * (a.y - 1.0) + a.z * a.z).sqrt();
        assert!((r - 10.0).abs() < 1e-9);
        assert_ne!(a, Position::fallback_for("HUP-1235", 10.0, 1.0));
    }

    #[test]
    fn test_from_record_aliases() {
        let config = AtlasConfig::default();
        let record = json!({
            "artifact_id": "A1",
            "vr_position": {"x": 1, "y": 2, "z": 3},
            "vr_scale": 0,
            "mention": "  Alabaster vase found in shaft  ",
            "type_specimen": "true",
            "Category": "ignored",
            "category": " Vessel ",
            "diary_date": "1925-02-03",
            "start_date": "1925-02-01",
            "to": "1925-02-05"
        });
        let artifact = Artifact::from_record(0, &record, &config).unwrap();
        assert_eq!(artifact.id, "A1");
        assert_eq!(artifact.position, Position::new(1.0, 2.0, 3.0));
        assert_eq!(artifact.placement, Placement::Recorded);
        assert_eq!(artifact.scale, None);
        assert_eq!(artifact.mention.as_deref(), Some("Alabaster vase found in shaft"));
        assert!(artifact.type_specimen);
        assert_eq!(artifact.metadata_value("category"), Some("vessel"));
        assert_eq!(artifact.dates.start[0].field, "start_date");
        assert_eq!(artifact.dates.end[0].field, "to");
        assert_eq!(artifact.dates.single[0].text, "1925-02-03");
    }

    #[test]
    fn test_from_record_fallbacks() {
        let config = AtlasConfig::default();
        let artifact = Artifact::from_record(7, &json!({"position": "nowhere"}), &config).unwrap();
        assert_eq!(artifact.id, "artifact-7");
        assert_eq!(artifact.placement, Placement::Fallback);
        assert_eq!(artifact.label_text(), "artifact-7");
    }

    #[test]
    fn test_from_record_rejects_non_object() {
        let config = AtlasConfig::default();
        assert!(Artifact::from_record(0, &json!("A1"), &config).is_err());
    }

    #[test]
    fn test_parse_artifact_list_shapes() {
        let config = AtlasConfig::default();
        let bare = parse_artifact_list(r#"[{"id": "a"}, {"id": "b"}]"#, &config).unwrap();
        assert_eq!(bare.len(), 2);
        let wrapped = parse_artifact_list(r#"{"artifacts": [{"id": "a"}]}"#, &config).unwrap();
        assert_eq!(wrapped[0].id, "a");
        assert!(parse_artifact_list(r#"{"items": []}"#, &config).is_err());
        assert!(parse_artifact_list("42", &config).is_err());
    }

    #[test]
    fn test_synthesized_ids_avoid_recorded_ones() {
        let config = AtlasConfig::default();
        let list = r#"[
            {"position": [0, 0, 0]},
            {"id": "artifact-0", "position": [50, 0, 50]},
            {"id": "artifact-0-2"}
        ]"#;
        let artifacts = parse_artifact_list(list, &config).unwrap();
        let ids: Vec<&str> = artifacts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["artifact-0-3", "artifact-0", "artifact-0-2"]);
    }

    #[test]
    fn test_duplicate_recorded_ids_are_kept() {
        let config = AtlasConfig::default();
        let artifacts = parse_artifact_list(r#"[{"id": "A"}, {"id": "A"}]"#, &config).unwrap();
        assert_eq!(artifacts.len(), 2);
        assert!(artifacts.iter().all(|a| a.id == "A"));
    }

    #[test]
    fn test_display_title_truncates() {
        let artifact = Artifact::new("X", Position::default())
            .with_mention("Seal   impression\nwith cartouche of Khufu");
        assert_eq!(artifact.display_title(120), "Seal impression with cartouche of Khufu");
        assert_eq!(artifact.display_title(8), "Seal im…");
        assert_eq!(Artifact::new("", Position::default()).display_title(10), "Unknown");
    }
}
