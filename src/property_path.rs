// Property paths
// Parsed accessors that read and write a location inside a Value

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::value::Value;
use thiserror::Error;

/// Property path errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Invalid property path \"{path}\": {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Property \"{property}\" does not exist on object of class \"{class}\"")]
    NoSuchProperty { property: String, class: String },

    #[error("Cannot access {segment}: expected {expected}, found {found}")]
    UnexpectedType {
        segment: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot write index [{index}]: list has {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Read/write access to a location inside a [`Value`].
///
/// This is the only thing the mapper needs from a path. [`PropertyPath`] is
/// the stock implementation.
pub trait PropertyAccess {
    /// Resolve the value at this path.
    fn read(&self, target: &Value) -> Result<Value, PathError>;

    /// Store `value` at this path, creating intermediate containers where the
    /// path allows it.
    fn write(&self, target: &mut Value, value: Value) -> Result<(), PathError>;
}

/// One step of a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// `name` or `.name`: an object property
    Property(String),
    /// `[key]`: an entry of a map or a position in a list
    Index(String),
}

impl PathSegment {
    fn expected(&self) -> &'static str {
        match self {
            PathSegment::Property(_) => "object",
            PathSegment::Index(_) => "map or list",
        }
    }

    fn unexpected(&self, found: &Value) -> PathError {
        PathError::UnexpectedType {
            segment: self.to_string(),
            expected: self.expected(),
            found: found.kind_name(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Property(name) => write!(f, "property \"{}\"", name),
            PathSegment::Index(key) => write!(f, "index [{}]", key),
        }
    }
}

/// A parsed property path such as `address.lines[0]` or `[user][name]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// Parse a path expression.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        PathParser::new(path).parse()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for PropertyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyPath::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Property(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Property(name) => write!(f, ".{}", name)?,
                PathSegment::Index(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}

impl PropertyAccess for PropertyPath {
    fn read(&self, target: &Value) -> Result<Value, PathError> {
        let mut current = target.clone();
        for segment in &self.segments {
            current = read_segment(&current, segment)?;
        }
        Ok(current)
    }

    fn write(&self, target: &mut Value, value: Value) -> Result<(), PathError> {
        write_segments(target, &self.segments, value)
    }
}

fn read_segment(current: &Value, segment: &PathSegment) -> Result<Value, PathError> {
    match (segment, current) {
        (PathSegment::Property(name), Value::Object(obj)) => {
            obj.property(name).ok_or_else(|| PathError::NoSuchProperty {
                property: name.clone(),
                class: obj.class().to_string(),
            })
        }
        // Missing entries read as null
        (PathSegment::Index(key), Value::Map(map)) => {
            Ok(map.get(key.as_str()).cloned().unwrap_or(Value::Null))
        }
        (PathSegment::Index(key), Value::List(list)) => Ok(key
            .parse::<usize>()
            .ok()
            .and_then(|i| list.get(i))
            .cloned()
            .unwrap_or(Value::Null)),
        (PathSegment::Index(_), Value::Null) => Ok(Value::Null),
        (segment, other) => Err(segment.unexpected(other)),
    }
}

fn write_segments(
    target: &mut Value,
    segments: &[PathSegment],
    value: Value,
) -> Result<(), PathError> {
    let (segment, rest) = match segments.split_first() {
        Some(split) => split,
        None => {
            *target = value;
            return Ok(());
        }
    };

    match segment {
        PathSegment::Property(name) => {
            let obj = match target {
                Value::Object(obj) => obj.clone(),
                other => return Err(segment.unexpected(other)),
            };
            if rest.is_empty() {
                obj.set_property(name.clone(), value);
                return Ok(());
            }
            let mut child = obj.property(name).ok_or_else(|| PathError::NoSuchProperty {
                property: name.clone(),
                class: obj.class().to_string(),
            })?;
            write_segments(&mut child, rest, value)?;
            // Objects were updated through the shared handle already
            if !child.is_object() {
                obj.set_property(name.clone(), child);
            }
            Ok(())
        }
        PathSegment::Index(key) => {
            if target.is_null() {
                *target = Value::empty_map();
            }
            match target {
                Value::Map(map) => {
                    if !map.contains_key(key.as_str()) {
                        if let Some(next @ PathSegment::Property(_)) = rest.first() {
                            return Err(next.unexpected(&Value::Null));
                        }
                    }
                    let map = Rc::make_mut(map);
                    let slot = map.entry(key.clone()).or_insert(Value::Null);
                    write_segments(slot, rest, value)
                }
                Value::List(list) => {
                    let index = key.parse::<usize>().map_err(|_| PathError::UnexpectedType {
                        segment: segment.to_string(),
                        expected: "numeric index",
                        found: "string",
                    })?;
                    // Writes may overwrite an element or append one, never leave holes
                    if index > list.len() {
                        return Err(PathError::IndexOutOfRange {
                            index,
                            len: list.len(),
                        });
                    }
                    if index == list.len() {
                        if let Some(next @ PathSegment::Property(_)) = rest.first() {
                            return Err(next.unexpected(&Value::Null));
                        }
                    }
                    let list = Rc::make_mut(list);
                    if index == list.len() {
                        list.push(Value::Null);
                    }
                    write_segments(&mut list[index], rest, value)
                }
                other => Err(segment.unexpected(other)),
            }
        }
    }
}

/// Splits `a.b[c]` style expressions into segments
struct PathParser {
    source: String,
    input: Vec<char>,
    position: usize,
}

impl PathParser {
    fn new(source: &str) -> Self {
        PathParser {
            source: source.to_string(),
            input: source.chars().collect(),
            position: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn error(&self, reason: impl Into<String>) -> PathError {
        PathError::InvalidPath {
            path: self.source.clone(),
            reason: reason.into(),
        }
    }

    fn parse(mut self) -> Result<PropertyPath, PathError> {
        if self.input.is_empty() {
            return Err(self.error("path is empty"));
        }

        let mut segments = Vec::new();
        loop {
            match self.current() {
                None => break,
                Some('[') => {
                    self.advance();
                    segments.push(PathSegment::Index(self.read_index()?));
                }
                Some('.') if !segments.is_empty() => {
                    self.advance();
                    segments.push(PathSegment::Property(self.read_name()?));
                }
                Some(_) if segments.is_empty() => {
                    segments.push(PathSegment::Property(self.read_name()?));
                }
                Some(c) => {
                    return Err(self.error(format!(
                        "unexpected '{}' at position {}",
                        c, self.position
                    )))
                }
            }
        }

        Ok(PropertyPath { segments })
    }

    fn read_name(&mut self) -> Result<String, PathError> {
        let start = self.position;
        while let Some(c) = self.current() {
            if matches!(c, '.' | '[' | ']') {
                break;
            }
            self.advance();
        }
        if self.position == start {
            return Err(self.error(format!("empty property name at position {}", start)));
        }
        Ok(self.input[start..self.position].iter().collect())
    }

    fn read_index(&mut self) -> Result<String, PathError> {
        let start = self.position;
        loop {
            match self.current() {
                None => return Err(self.error("unclosed '['")),
                Some(']') => break,
                Some(_) => self.advance(),
            }
        }
        let key: String = self.input[start..self.position].iter().collect();
        self.advance();
        if key.is_empty() {
            return Err(self.error(format!("empty index at position {}", start - 1)));
        }
        Ok(key)
    }
}
