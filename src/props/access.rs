use super::*;
use crate::ast::{ArrayState, Definition, Value};

impl PropsTree {
    /// Get a typed value using dot notation.
    ///
    /// # Examples
    /// ```no_run
    /// # use ueprops::PropsTree;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let props = PropsTree::from_file("mesh.props.txt")?;
    /// let x: f64 = props.get("Position.X")?;
    /// let two_sided: bool = props.get("BasePropertyOverrides.TwoSided")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns an error if the path doesn't exist or the value can't be
    /// converted to type `T`.
    pub fn get<T>(&self, path: &str) -> Result<T, PropsError>
    where
        T: TryFrom<Value, Error = PropsError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, self.raw_content()))
    }

    /// Get an optional typed value - returns `None` if the key doesn't
    /// exist.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, PropsError>
    where
        T: TryFrom<Value, Error = PropsError>,
    {
        match self.get_value(path) {
            Ok(value) => Ok(Some(T::try_from(value)?)),
            Err(PropsError::SyntaxError { code: Some(304), .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use ueprops::PropsTree;
    /// # let props = PropsTree::from_file("mat.props.txt").unwrap();
    /// let clip = props.get_or("BasePropertyOverrides.OpacityMaskClipValue", 0.5f64);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = PropsError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value` from the tree.
    ///
    /// Dotted paths descend through nested blocks. Repeated names resolve
    /// first-match-wins; indexed duplicates are reached through
    /// [`Document::slots`](crate::ast::Document::slots) instead.
    pub fn get_value(&self, path: &str) -> Result<Value, PropsError> {
        // Root lookup: the whole document as one block.
        if path.trim().is_empty() {
            return Ok(Value::Block(self.doc.defs.clone()));
        }

        let segments: Vec<&str> = path.split('.').collect();

        lookup(&self.doc.defs, &segments).cloned().ok_or_else(|| {
            let (line, snippet) = helpers::find_source_line(path, self.raw_content());
            if line > 0 {
                PropsError::SyntaxError {
                    message: format!(
                        "Path '{}' found but could not be resolved on line {}",
                        path, line
                    ),
                    line,
                    column: 0,
                    hint: Some(format!("Check the value at: {}", snippet)),
                    code: Some(304),
                }
            } else {
                PropsError::SyntaxError {
                    message: format!("Path '{}' not found", path),
                    line: 0,
                    column: 0,
                    hint: Some("Check that the key exists in the dump".into()),
                    code: Some(304),
                }
            }
        })
    }

    /// All keys of the block at a given path.
    pub fn keys(&self, path: &str) -> Result<Vec<String>, PropsError> {
        let value = self.get_value(path)?;
        match value {
            Value::Block(defs) => Ok(defs.iter().map(|d| d.name.clone()).collect()),
            _ => Err(PropsError::TypeError {
                message: format!("Path '{}' is not a block", path),
                line: 0,
                column: 0,
                hint: Some("Only blocks have keys".into()),
                code: Some(406),
            }),
        }
    }

    /// Check if a path exists.
    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }

    /// Presence of an array-valued key at a dotted path: absent,
    /// present-but-empty, or populated. The importers need all three
    /// states kept apart to rebuild fixed-size engine arrays.
    pub fn array_state(&self, path: &str) -> ArrayState {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return ArrayState::Absent;
        };

        let defs: &[Definition] = if parents.is_empty() {
            &self.doc.defs
        } else {
            match lookup(&self.doc.defs, parents) {
                Some(Value::Block(defs)) => defs,
                _ => return ArrayState::Absent,
            }
        };

        match defs.iter().find(|d| d.name == *last) {
            None => ArrayState::Absent,
            Some(def) => match &def.value {
                Value::EmptyList => ArrayState::Empty,
                Value::List(items) => ArrayState::Populated(items.len()),
                Value::Block(children) => ArrayState::Populated(children.len()),
                _ => ArrayState::Populated(1),
            },
        }
    }
}

fn lookup<'a>(defs: &'a [Definition], segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let def = defs.iter().find(|d| d.name == *first)?;

    if rest.is_empty() {
        return Some(&def.value);
    }

    match &def.value {
        Value::Block(children) => lookup(children, rest),
        _ => None,
    }
}

/// Enhance type/validation errors with line number information from the
/// raw dump.
fn enhance_error_with_line_info(e: PropsError, path: &str, raw_content: &str) -> PropsError {
    match e {
        PropsError::TypeError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_source_line(path, raw_content);
            if line > 0 {
                PropsError::TypeError {
                    message: format!("{}\n  → {}", message, snippet),
                    line,
                    column: 0,
                    hint,
                    code,
                }
            } else {
                PropsError::TypeError { message, line: 0, column: 0, hint, code }
            }
        }
        PropsError::ValidationError { message, hint, code, .. } => {
            let (line, snippet) = helpers::find_source_line(path, raw_content);
            if line > 0 {
                PropsError::ValidationError {
                    message: format!("{}\n  → {}", message, snippet),
                    line,
                    column: 0,
                    hint,
                    code,
                }
            } else {
                PropsError::ValidationError { message, line: 0, column: 0, hint, code }
            }
        }
        other => other,
    }
}
