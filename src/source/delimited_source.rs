use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};
use tokio::{fs::File, io::{AsyncBufReadExt, BufReader}};
use tracing::debug;

use crate::{aggregators_helper::AggregateError, JsonPrimitive};

/// Marker some table formats write for a NULL field.
const NULL_MARKER: &str = "\\N";

/// Row source for delimited text tables (one row per line).
///
/// Each field is typed by the declared schema and the row comes out as a
/// JSON object keyed by column name. Empty fields and `\N` read as NULL,
/// missing trailing fields as NULL, extra fields are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct DelimitedSource {
    schema: IndexMap<String, JsonPrimitive>,
    delimiter: char,
}

impl DelimitedSource {
    /// Tab-delimited source over `schema`.
    pub fn new(schema: IndexMap<String, JsonPrimitive>) -> Self {
        Self { schema, delimiter: '\t' }
    }

    /// Build the schema from a column list such as `"str string, countVal int"`.
    pub fn from_declaration(columns: &str) -> Result<Self, AggregateError> {
        let mut schema = IndexMap::new();
        for col in columns.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let mut parts = col.split_whitespace();
            let (Some(name), Some(ty), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(AggregateError::Source(format!("invalid column declaration '{}'", col)));
            };
            let ty = JsonPrimitive::from_type_name(ty)
                .ok_or_else(|| AggregateError::Source(format!("unknown type '{}' for column {}", ty, name)))?;
            schema.insert(name.to_string(), ty);
        }
        Ok(Self::new(schema))
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn schema(&self) -> &IndexMap<String, JsonPrimitive> {
        &self.schema
    }

    pub fn parse_line(&self, line: &str) -> Result<Value, AggregateError> {
        let line = line.trim_end_matches('\r');
        let mut fields = line.split(self.delimiter);
        let mut row = Map::new();
        for (name, ty) in &self.schema {
            let value = match fields.next() {
                None => Value::Null,
                Some(raw) => Self::parse_field(raw, *ty)
                    .map_err(|msg| AggregateError::Source(format!("column {}: {}", name, msg)))?,
            };
            row.insert(name.clone(), value);
        }
        Ok(Value::Object(row))
    }

    pub fn parse_str(&self, text: &str) -> Result<Vec<Value>, AggregateError> {
        let mut rows = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            rows.push(self.parse_line(line).map_err(|e| Self::at_line(idx + 1, e))?);
        }
        Ok(rows)
    }

    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<Value>, AggregateError> {
        let path = path.as_ref();
        let file = File::open(path).await
            .map_err(|e| AggregateError::Source(format!("could not read file {}: {}", path.display(), e)))?;

        let mut lines = BufReader::new(file).lines();
        let mut rows = Vec::new();
        let mut line_no = 0usize;
        while let Some(line) = lines.next_line().await
            .map_err(|e| AggregateError::Source(format!("could not read file {}: {}", path.display(), e)))?
        {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(self.parse_line(&line).map_err(|e| Self::at_line(line_no, e))?);
        }

        debug!(path = %path.display(), rows = rows.len(), "delimited file loaded");
        Ok(rows)
    }

    fn parse_field(raw: &str, ty: JsonPrimitive) -> Result<Value, String> {
        if raw.is_empty() || raw == NULL_MARKER {
            return Ok(Value::Null);
        }
        match ty {
            JsonPrimitive::Null => Ok(Value::Null),
            JsonPrimitive::String => Ok(Value::String(raw.to_string())),
            JsonPrimitive::Int => raw.trim().parse::<i64>()
                .map(|i| Value::Number(Number::from(i)))
                .map_err(|_| format!("expected int, got '{}'", raw)),
            JsonPrimitive::Float => raw.trim().parse::<f64>().ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| format!("expected float, got '{}'", raw)),
            JsonPrimitive::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(format!("expected bool, got '{}'", raw)),
            },
            JsonPrimitive::Object | JsonPrimitive::Array => {
                let v: Value = serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))?;
                if JsonPrimitive::of_value(&v) == ty {
                    Ok(v)
                } else {
                    Err(format!("expected {}, got {}", ty, JsonPrimitive::of_value(&v)))
                }
            }
        }
    }

    fn at_line(line: usize, err: AggregateError) -> AggregateError {
        match err {
            AggregateError::Source(msg) => AggregateError::Source(format!("line {}: {}", line, msg)),
            other => other,
        }
    }
}
