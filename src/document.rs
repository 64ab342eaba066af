//! Event documents and the JSON batch format they travel in.
//!
//! Input:
//! ```json
//! {"events": [{"id": 1, "date": "2020-01-01", "text": "...", "entities": ["..."]}]}
//! ```
//! Output repeats every input field and adds `tf_idf` (and `cos_sim` when the
//! similarity stage ran).

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{PipelineError, Result};
use crate::utils::math::vector::ZeroSpVec;

/// Opaque external identifier, emitted back exactly as it was read.
/// Integer ids keep their JSON number, so values past `i64::MAX` survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventId {
    Int(Number),
    Str(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(id) => write!(f, "{id}"),
            EventId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        EventId::Int(Number::from(id))
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId::Int(Number::from(id))
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId::Str(id.to_string())
    }
}

/// One event of a batch.
///
/// Identifier, date, text and entities are fixed at construction.
/// The pipeline only attaches the weight vector and the similarity row.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    id: EventId,
    date: String,
    text: String,
    entities: Vec<Value>,
    tf_idf: ZeroSpVec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cos_sim: Option<Vec<f64>>,
}

impl Document {
    pub fn new(id: impl Into<EventId>, date: impl Into<String>, text: impl Into<String>, entities: Vec<Value>) -> Self {
        Document {
            id: id.into(),
            date: date.into(),
            text: text.into(),
            entities,
            // each document owns its own vector from the start
            tf_idf: ZeroSpVec::default(),
            cos_sim: None,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn entities(&self) -> &[Value] {
        &self.entities
    }

    /// TF-IDF weights keyed by vocabulary id. All-zero until the pipeline ran.
    pub fn tf_idf(&self) -> &ZeroSpVec<f64> {
        &self.tf_idf
    }

    /// Similarity scores aligned to corpus position, when the similarity stage ran.
    pub fn cos_sim(&self) -> Option<&[f64]> {
        self.cos_sim.as_deref()
    }

    pub fn set_tf_idf(&mut self, tf_idf: ZeroSpVec<f64>) {
        self.tf_idf = tf_idf;
    }

    pub fn set_cos_sim(&mut self, row: Vec<f64>) {
        self.cos_sim = Some(row);
    }
}

/// Record as it appears in the input, before required fields are checked.
/// Fields stay untyped so a bad one can be reported with its position.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    entities: Option<Value>,
}

impl RawEvent {
    fn into_document(self, index: usize) -> Result<Document> {
        let required = |value: Option<Value>, field| match value {
            None | Some(Value::Null) => Err(PipelineError::MissingField { index, field }),
            Some(value) => Ok(value),
        };
        let invalid = |field, reason: &str| PipelineError::InvalidField {
            index,
            field,
            reason: reason.to_string(),
        };

        let id = match required(self.id, "id")? {
            Value::String(id) => EventId::Str(id),
            Value::Number(n) if n.is_i64() || n.is_u64() => EventId::Int(n),
            Value::Number(_) => return Err(invalid("id", "expected an integer, not a fraction")),
            _ => return Err(invalid("id", "expected an integer or a string")),
        };
        let Value::String(date) = required(self.date, "date")? else {
            return Err(invalid("date", "expected a string"));
        };
        let Value::String(text) = required(self.text, "text")? else {
            return Err(invalid("text", "expected a string"));
        };
        let Value::Array(entities) = required(self.entities, "entities")? else {
            return Err(invalid("entities", "expected a list"));
        };
        Ok(Document::new(id, date, text, entities))
    }
}

#[derive(Debug, Deserialize)]
struct EventBatchIn {
    events: Vec<RawEvent>,
}

#[derive(Debug, Serialize)]
struct EventBatchOut<'a> {
    events: &'a [Document],
}

/// Parses an event batch. Any malformed record fails the whole batch.
pub fn parse_events(json: &str) -> Result<Vec<Document>> {
    let batch: EventBatchIn = serde_json::from_str(json)?;
    into_documents(batch)
}

/// Reads an event batch from `reader`. Any malformed record fails the whole batch.
pub fn read_events<R: Read>(reader: R) -> Result<Vec<Document>> {
    let batch: EventBatchIn = serde_json::from_reader(reader)?;
    into_documents(batch)
}

fn into_documents(batch: EventBatchIn) -> Result<Vec<Document>> {
    batch
        .events
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_document(index))
        .collect()
}

/// Writes processed documents as an event batch.
pub fn write_events<W: Write>(writer: W, documents: &[Document]) -> Result<()> {
    serde_json::to_writer(writer, &EventBatchOut { events: documents })?;
    Ok(())
}
