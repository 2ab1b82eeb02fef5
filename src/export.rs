// License: MIT

use std::fs;

use serde_json::json;

use crate::PropsError;
use crate::ast::{Definition, Document, Quote, Scalar, Value};
use crate::parser::Parser;

/// Export a parsed dump to JSON.
///
/// Definitions render as an ordered array of `{name, index?, value}`
/// entries so duplicate names, sparse indices and declaration order all
/// survive. Scalars map to native JSON where lossless; anything the
/// importers still care about keeps its metadata:
/// - single-quoted strings → `{"text": ..., "quote": "single"}`
/// - call-shaped constants → `{"call": ..., "arg": ...}`
/// - clamped integers → `{"int": ..., "raw": ...}`
/// - path references → `{"path": {"class": ..., "target": ...}}`
/// - an empty-but-present list → `[]` (a const list is never empty, so
///   this stays unambiguous)
pub fn export_document_to_json(doc: &Document) -> Result<String, PropsError> {
    fn scalar_to_json(s: &Scalar) -> serde_json::Value {
        match s {
            Scalar::Int(lit) if lit.clamped => json!({ "int": lit.value, "raw": lit.raw }),
            Scalar::Int(lit) => json!(lit.value),
            Scalar::Double(lit) => json!(lit.value),
            Scalar::Bool(b) => json!(b),
            Scalar::Str(lit) if lit.quote == Quote::Single => {
                json!({ "text": lit.text, "quote": "single" })
            }
            Scalar::Str(lit) => json!(lit.text),
            Scalar::Call { name, arg } => json!({ "call": name, "arg": scalar_to_json(arg) }),
            Scalar::Word(w) => json!(w),
        }
    }

    fn value_to_json(v: &Value) -> serde_json::Value {
        match v {
            Value::Block(defs) => json!({ "block": defs_to_json(defs) }),
            Value::Path(p) => json!({ "path": { "class": p.class, "target": p.target } }),
            Value::Scalar(s) => scalar_to_json(s),
            Value::List(items) => {
                json!(items.iter().map(scalar_to_json).collect::<Vec<_>>())
            }
            Value::EmptyList => json!([]),
        }
    }

    fn defs_to_json(defs: &[Definition]) -> serde_json::Value {
        let mut out: Vec<serde_json::Value> = Vec::new();

        for def in defs {
            let mut entry = serde_json::Map::new();
            entry.insert("name".into(), json!(def.name));
            if let Some(index) = def.index {
                entry.insert("index".into(), json!(index));
            }
            entry.insert("value".into(), value_to_json(&def.value));
            out.push(serde_json::Value::Object(entry));
        }

        serde_json::Value::Array(out)
    }

    Ok(serde_json::to_string_pretty(&defs_to_json(&doc.defs)).unwrap())
}

/// Export a props.txt file directly to JSON.
///
/// Convenience function that reads, parses, and exports in one call.
///
/// # Errors
/// Returns an error if the file doesn't exist or contains invalid
/// props.txt syntax.
pub fn export_props_file(path: &str) -> Result<String, PropsError> {
    let input = fs::read_to_string(path).map_err(|e| PropsError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string(),
        hint: None,
        code: Some(500),
    })?;

    let mut parser = Parser::new(&input)?;
    let doc = parser.parse_document()?;
    export_document_to_json(&doc)
}
