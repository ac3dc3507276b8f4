//! Keybinding extraction from the Openbox configuration document.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::config::RC_NAMESPACE;

/// How a keybinding acts: a window-manager-native action, or an external
/// command launched by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Builtin,
    Command,
}

/// One extracted keybinding. `combo` is never empty; `action` may be, in
/// which case it renders blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub kind: BindingKind,
    pub combo: String,
    pub action: String,
}

/// Error types for configuration extraction.
#[derive(Debug)]
pub enum ParseError {
    Unreadable(PathBuf, std::io::Error),
    BadRoot(String),
    Malformed(String),
    Xml(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Unreadable(path, e) => {
                write!(f, "Cannot read config file {}: {}", path.display(), e)
            }
            ParseError::BadRoot(msg) => write!(f, "Unexpected config root: {}", msg),
            ParseError::Malformed(msg) => write!(f, "Malformed config: {}", msg),
            ParseError::Xml(msg) => write!(f, "XML parse error: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Read the configuration file at `path` and extract its keybindings.
pub fn load_keybinds(path: &Path) -> Result<Vec<Keybind>, ParseError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ParseError::Unreadable(path.to_path_buf(), e))?;
    parse_keybinds(&content)
}

// Capture state while inside an <action> element whose text content is the
// record's action (Execute and ShowMenu). Only the first non-empty text
// value counts; later candidates are ignored.
struct ActionCapture {
    record: usize,
    captured: bool,
}

/// Extract keybindings from document text, in document order.
///
/// Fails fast: a missing or mis-namespaced root, a keybind without a key,
/// or a non-well-formed document all abort with no partial result.
pub fn parse_keybinds(xml: &str) -> Result<Vec<Keybind>, ParseError> {
    let mut reader = Reader::from_str(xml);

    let mut records: Vec<Keybind> = Vec::new();
    let mut root_seen = false;
    let mut in_keyboard = false;
    // Open keybind elements, innermost last: (record index, action seen).
    let mut open_binds: Vec<(usize, bool)> = Vec::new();
    let mut capture: Option<ActionCapture> = None;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                handle_open(
                    &e,
                    false,
                    &mut records,
                    &mut root_seen,
                    &mut in_keyboard,
                    &mut open_binds,
                    &mut capture,
                )?;
            }
            Ok(Event::Empty(e)) => {
                handle_open(
                    &e,
                    true,
                    &mut records,
                    &mut root_seen,
                    &mut in_keyboard,
                    &mut open_binds,
                    &mut capture,
                )?;
            }
            Ok(Event::Text(t)) => {
                if let Some(cap) = capture.as_mut() {
                    if !cap.captured {
                        let text = t
                            .unescape()
                            .map_err(|e| ParseError::Xml(e.to_string()))?;
                        let text = text.trim();
                        if !text.is_empty() {
                            records[cap.record].action = text.to_string();
                            cap.captured = true;
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"action" => capture = None,
                b"keybind" => {
                    open_binds.pop();
                }
                b"keyboard" => in_keyboard = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !root_seen {
        return Err(ParseError::BadRoot("document has no root element".to_string()));
    }

    Ok(records)
}

fn handle_open(
    e: &BytesStart,
    self_closing: bool,
    records: &mut Vec<Keybind>,
    root_seen: &mut bool,
    in_keyboard: &mut bool,
    open_binds: &mut Vec<(usize, bool)>,
    capture: &mut Option<ActionCapture>,
) -> Result<(), ParseError> {
    if !*root_seen {
        check_root(e)?;
        *root_seen = true;
        return Ok(());
    }

    match e.name().as_ref() {
        b"keyboard" => {
            if !self_closing {
                *in_keyboard = true;
            }
        }
        b"keybind" if *in_keyboard => {
            let key = attr_value(e, b"key").unwrap_or_default();
            if key.is_empty() {
                return Err(ParseError::Malformed(
                    "keybind without a key attribute".to_string(),
                ));
            }
            records.push(Keybind {
                kind: BindingKind::Builtin,
                combo: key,
                action: String::new(),
            });
            if !self_closing {
                open_binds.push((records.len() - 1, false));
            }
        }
        b"action" if *in_keyboard => {
            let Some(bind) = open_binds.last_mut() else {
                return Ok(());
            };
            if bind.1 {
                // Only the first action of a keybind counts.
                return Ok(());
            }
            bind.1 = true;

            let idx = bind.0;
            let name = attr_value(e, b"name").ok_or_else(|| {
                ParseError::Malformed("action without a name attribute".to_string())
            })?;
            match name.as_str() {
                "Execute" => {
                    records[idx].kind = BindingKind::Command;
                    if !self_closing {
                        *capture = Some(ActionCapture {
                            record: idx,
                            captured: false,
                        });
                    }
                }
                "ShowMenu" => {
                    if !self_closing {
                        *capture = Some(ActionCapture {
                            record: idx,
                            captured: false,
                        });
                    }
                }
                _ => records[idx].action = name,
            }
        }
        _ => {}
    }

    Ok(())
}

fn check_root(e: &BytesStart) -> Result<(), ParseError> {
    if e.name().as_ref() != b"openbox_config" {
        return Err(ParseError::BadRoot(format!(
            "expected openbox_config, found {}",
            String::from_utf8_lossy(e.name().as_ref())
        )));
    }
    match attr_value(e, b"xmlns") {
        Some(ns) if ns == RC_NAMESPACE => Ok(()),
        Some(ns) => Err(ParseError::BadRoot(format!(
            "unsupported namespace {}",
            ns
        ))),
        None => Err(ParseError::BadRoot("missing xmlns declaration".to_string())),
    }
}

fn attr_value(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| String::from_utf8(a.value.to_vec()).ok())
}
