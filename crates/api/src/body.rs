//! Request-body readers.
//!
//! Each format has a strict reader returning [`BodyError`] and a lenient
//! one matching the historical contract: log the failure at error level
//! and hand back an empty/null value, never raise. The lenient readers
//! cannot distinguish an empty body from a malformed one; callers that
//! care use the `try_` variants.

use std::ops::Deref;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BodyError {
    #[error("request body is empty")]
    Empty,

    #[error("request body is not valid UTF-8")]
    InvalidUtf8,

    #[error("malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("JSON body is not an object")]
    NotAnObject,

    #[error("malformed XML body: {0}")]
    MalformedXml(String),
}

/// Parsed JSON request arguments: an ordered map with key lookup plus
/// typed field access.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Args(Map<String, Value>);

impl Args {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Typed access to one field; `None` if absent or of the wrong shape.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for Args {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Strict JSON reader: distinguishes empty, non-UTF-8, malformed, and
/// non-object bodies.
pub fn try_json_arguments(body: &[u8]) -> Result<Args, BodyError> {
    let text = std::str::from_utf8(body).map_err(|_| BodyError::InvalidUtf8)?;
    if text.trim().is_empty() {
        return Err(BodyError::Empty);
    }
    let value: Value =
        serde_json::from_str(text).map_err(|e| BodyError::MalformedJson(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(Args(map)),
        _ => Err(BodyError::NotAnObject),
    }
}

/// Lenient JSON reader: any failure is logged and replaced with empty
/// arguments.
pub fn json_arguments(body: &[u8]) -> Args {
    match try_json_arguments(body) {
        Ok(args) => args,
        Err(err) => {
            error!(error = %err, "failed to read JSON request body");
            Args::default()
        }
    }
}

/// One element of a parsed XML request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn open_element(start: &BytesStart<'_>) -> XmlElement {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attributes = Vec::new();
    for attr in start.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        attributes.push((key, value));
    }
    XmlElement {
        tag,
        attributes,
        children: Vec::new(),
        text: String::new(),
    }
}

fn close_element(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), BodyError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_some() {
        Err(BodyError::MalformedXml(
            "more than one root element".to_owned(),
        ))
    } else {
        *root = Some(element);
        Ok(())
    }
}

/// Strict XML reader: parses the body into an element tree.
pub fn try_xml_arguments(body: &[u8]) -> Result<XmlElement, BodyError> {
    let text = std::str::from_utf8(body).map_err(|_| BodyError::InvalidUtf8)?;
    if text.trim().is_empty() {
        return Err(BodyError::Empty);
    }

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(open_element(e)),
            Ok(Event::End(ref e)) => {
                let closing = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let Some(element) = stack.pop() else {
                    return Err(BodyError::MalformedXml(format!(
                        "unexpected closing tag '{closing}'"
                    )));
                };
                if element.tag != closing {
                    return Err(BodyError::MalformedXml(format!(
                        "expected closing tag '{}', found '{closing}'",
                        element.tag
                    )));
                }
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::Empty(ref e)) => {
                let element = open_element(e);
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref e)) => {
                let fragment = String::from_utf8_lossy(e.as_ref());
                let fragment = fragment.trim();
                if !fragment.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.text.push_str(fragment);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(BodyError::MalformedXml(e.to_string())),
            _ => {}
        }
    }

    if let Some(unclosed) = stack.pop() {
        return Err(BodyError::MalformedXml(format!(
            "unclosed element '{}'",
            unclosed.tag
        )));
    }
    root.ok_or_else(|| BodyError::MalformedXml("no root element".to_owned()))
}

/// Lenient XML reader: any failure is logged and replaced with `None`.
pub fn xml_arguments(body: &[u8]) -> Option<XmlElement> {
    match try_xml_arguments(body) {
        Ok(element) => Some(element),
        Err(err) => {
            error!(error = %err, "failed to read XML request body");
            None
        }
    }
}
