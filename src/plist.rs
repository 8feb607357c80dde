//! Minimal XML property-list support.
//!
//! Only the subset a Settings bundle needs is handled: dictionaries, arrays
//! and strings. Dictionary keys are kept sorted, so writing is deterministic.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const DOCTYPE: &str =
    r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Array(Vec<Value>),
    Dictionary(BTreeMap<String, Value>),
}

impl Value {
    /// Build a dictionary from `(key, value)` pairs.
    pub fn dictionary<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Dictionary(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up `key` when this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Dictionary(map) => map.get(key),
            _ => None,
        }
    }
}

/// Write `value` as a complete property-list document, replacing any existing file.
pub fn write_file(value: &Value, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    to_writer(value, &mut out).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()?;
    Ok(())
}

pub fn to_writer<W: Write>(value: &Value, inner: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(inner, b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;
    writer.write_event(Event::Start(
        BytesStart::new("plist").with_attributes([("version", "1.0")]),
    ))?;
    write_value(&mut writer, value)?;
    writer.write_event(Event::End(BytesEnd::new("plist")))?;

    writer.into_inner().write_all(b"\n")?;
    Ok(())
}

pub fn to_string(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    to_writer(value, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_value<W: Write>(writer: &mut Writer<W>, value: &Value) -> Result<()> {
    match value {
        Value::String(s) => write_text_element(writer, "string", s)?,
        Value::Array(items) if items.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new("array")))?;
        }
        Value::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new("array")))?;
            for item in items {
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("array")))?;
        }
        Value::Dictionary(map) if map.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new("dict")))?;
        }
        Value::Dictionary(map) => {
            writer.write_event(Event::Start(BytesStart::new("dict")))?;
            for (key, item) in map {
                write_text_element(writer, "key", key)?;
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("dict")))?;
        }
    }
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    let text = strip_forbidden(text);
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text.as_ref()))))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Drop characters XML 1.0 does not allow anywhere in a document, such as
/// the form feeds found in GPL texts.
fn strip_forbidden(text: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        !matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
    }

    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
    }
}

pub fn read_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

enum Frame {
    Key(String),
    String(String),
    Array(Vec<Value>),
    /// Entries so far, plus a key still waiting for its value.
    Dictionary(BTreeMap<String, Value>, Option<String>),
}

enum Finished {
    Key(String),
    Value(Value),
}

/// Parse a property-list document using quick-xml's event API.
pub fn from_str(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match std::str::from_utf8(e.local_name().as_ref())? {
                "plist" => {}
                "dict" => stack.push(Frame::Dictionary(BTreeMap::new(), None)),
                "array" => stack.push(Frame::Array(Vec::new())),
                "key" => stack.push(Frame::Key(String::new())),
                "string" => stack.push(Frame::String(String::new())),
                other => bail!("unsupported plist element <{other}>"),
            },
            Event::Empty(e) => {
                let done = match std::str::from_utf8(e.local_name().as_ref())? {
                    "plist" => continue,
                    "dict" => Finished::Value(Value::Dictionary(BTreeMap::new())),
                    "array" => Finished::Value(Value::Array(Vec::new())),
                    "key" => Finished::Key(String::new()),
                    "string" => Finished::Value(Value::String(String::new())),
                    other => bail!("unsupported plist element <{other}/>"),
                };
                attach(&mut stack, &mut root, done)?;
            }
            Event::Text(e) => {
                // Whitespace between structural elements is only indentation.
                if let Some(Frame::Key(buf) | Frame::String(buf)) = stack.last_mut() {
                    buf.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(Frame::Key(buf) | Frame::String(buf)) = stack.last_mut() {
                    buf.push_str(std::str::from_utf8(&e)?);
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"plist" {
                    continue;
                }
                let done = match stack.pop().context("unbalanced closing tag")? {
                    Frame::Key(key) => Finished::Key(key),
                    Frame::String(s) => Finished::Value(Value::String(s)),
                    Frame::Array(items) => Finished::Value(Value::Array(items)),
                    Frame::Dictionary(map, None) => Finished::Value(Value::Dictionary(map)),
                    Frame::Dictionary(_, Some(key)) => bail!("key {key:?} has no value"),
                };
                attach(&mut stack, &mut root, done)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        bail!("unexpected end of document");
    }
    root.context("document has no root value")
}

fn attach(stack: &mut [Frame], root: &mut Option<Value>, done: Finished) -> Result<()> {
    match (stack.last_mut(), done) {
        (Some(Frame::Dictionary(_, pending)), Finished::Key(key)) => {
            if pending.is_some() {
                bail!("two keys in a row");
            }
            *pending = Some(key);
        }
        (Some(Frame::Dictionary(map, pending)), Finished::Value(value)) => {
            let key = pending.take().context("dictionary value without a key")?;
            map.insert(key, value);
        }
        (Some(Frame::Array(items)), Finished::Value(value)) => items.push(value),
        (None, Finished::Value(value)) => {
            if root.is_some() {
                bail!("more than one root value");
            }
            *root = Some(value);
        }
        _ => bail!("misplaced element"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::dictionary([(
            "PreferenceSpecifiers",
            Value::Array(vec![Value::dictionary([
                ("Type", Value::string("PSGroupSpecifier")),
                ("FooterText", Value::string("Copyright <c> 2024 A & B\n\nAll rights.")),
            ])]),
        )])
    }

    #[test]
    fn test_document_header() {
        let xml = to_string(&sample()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<!DOCTYPE plist PUBLIC"));
        assert!(xml.contains(r#"<plist version="1.0">"#));
        assert!(xml.trim_end().ends_with("</plist>"));
    }

    #[test]
    fn test_keys_are_sorted_and_text_escaped() {
        let xml = to_string(&sample()).unwrap();
        let footer = xml.find("<key>FooterText</key>").unwrap();
        let kind = xml.find("<key>Type</key>").unwrap();
        assert!(footer < kind);
        assert!(xml.contains("Copyright &lt;c&gt; 2024 A &amp; B"));
    }

    #[test]
    fn test_read_back_preserves_text() {
        let value = sample();
        let parsed = from_str(&to_string(&value).unwrap()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let value = Value::string("GNU GPL\n\n\u{c}\n\nEND\u{1}\tx");
        let xml = to_string(&value).unwrap();
        assert!(!xml.contains('\u{c}'));
        assert!(!xml.contains('\u{1}'));
        assert_eq!(
            from_str(&xml).unwrap(),
            Value::string("GNU GPL\n\n\n\nEND\tx")
        );
    }

    #[test]
    fn test_empty_array() {
        let value = Value::dictionary([("PreferenceSpecifiers", Value::Array(Vec::new()))]);
        let xml = to_string(&value).unwrap();
        assert!(xml.contains("<array/>"));
        let parsed = from_str(&xml).unwrap();
        assert_eq!(
            parsed.get("PreferenceSpecifiers").and_then(Value::as_array),
            Some(&[][..])
        );
    }

    #[test]
    fn test_reads_foreign_plist() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>StringsTable</key>
	<string>Root</string>
	<key>Title</key>
	<string/>
</dict>
</plist>
"#;
        let parsed = from_str(xml).unwrap();
        assert_eq!(parsed.get("StringsTable").and_then(Value::as_str), Some("Root"));
        assert_eq!(parsed.get("Title").and_then(Value::as_str), Some(""));
    }

    #[test]
    fn test_rejects_unsupported_elements() {
        let xml = "<plist version=\"1.0\"><dict><key>n</key><integer>1</integer></dict></plist>";
        assert!(from_str(xml).is_err());
    }

    #[test]
    fn test_rejects_dangling_key() {
        let xml = "<plist version=\"1.0\"><dict><key>n</key></dict></plist>";
        assert!(from_str(xml).is_err());
    }
}
