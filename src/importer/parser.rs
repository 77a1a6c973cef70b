use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::ImportError;
use crate::models::{ClaimedFields, Field, Record, RegistryMapping, DESCRIPTION};

/// Depth of the `rdf:Description` elements (children of the document root).
const DESCRIPTION_DEPTH: usize = 2;
/// Depth of the field elements inside a description.
const FIELD_DEPTH: usize = 3;

/// Parse the UniProt RDF/XML registry into a prefix-keyed mapping.
///
/// Only `rdf:Description` elements directly under the root are considered. For
/// each of the known [`Field`]s the text of the *first* matching child element is
/// taken; empty values are dropped. Records without a prefix are skipped and a
/// repeated prefix replaces the earlier record.
pub fn parse_registry(content: &[u8]) -> Result<RegistryMapping, ImportError> {
    let mut reader = NsReader::from_reader(content);
    let mut buf = Vec::new();
    let mut state = ParseState::default();

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (ns, Event::Start(ref e)) => {
                state.open(namespace_of(ns)?, e.local_name().as_ref())?;
            }
            (ns, Event::Empty(ref e)) => {
                state.open(namespace_of(ns)?, e.local_name().as_ref())?;
                state.close();
            }
            (_, Event::End(_)) => state.close(),
            (_, Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| ImportError::Parse(err.to_string()))?;
                state.text(&text)?;
            }
            (_, Event::CData(e)) => {
                state.text(&String::from_utf8_lossy(&e.into_inner()))?;
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    state.finish()
}

fn namespace_of(ns: ResolveResult<'_>) -> Result<Option<&[u8]>, ImportError> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(uri)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ImportError::Parse(format!(
            "unbound namespace prefix `{}`",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

/// Text being collected for one field element.
struct Capture {
    field: Field,
    text: String,
    /// Set once a child element starts; later text is a tail, not the value.
    complete: bool,
}

#[derive(Default)]
struct ParseState {
    depth: usize,
    seen_root: bool,
    root_closed: bool,
    record: Option<(Record, ClaimedFields)>,
    capture: Option<Capture>,
    registry: RegistryMapping,
}

impl ParseState {
    fn open(&mut self, namespace: Option<&[u8]>, local_name: &[u8]) -> Result<(), ImportError> {
        if self.root_closed {
            return Err(ImportError::Parse(
                "element found after the root element".to_string(),
            ));
        }
        self.seen_root = true;
        self.depth += 1;

        match self.depth {
            DESCRIPTION_DEPTH if is_description(namespace, local_name) => {
                self.record = Some((Record::default(), ClaimedFields::default()));
            }
            FIELD_DEPTH => {
                if let Some((_, claimed)) = self.record.as_mut() {
                    let field = namespace.and_then(|ns| Field::from_element(ns, local_name));
                    if let Some(field) = field {
                        if claimed.claim(field) {
                            self.capture = Some(Capture {
                                field,
                                text: String::new(),
                                complete: false,
                            });
                        }
                    }
                }
            }
            _ => {
                if let Some(capture) = self.capture.as_mut() {
                    capture.complete = true;
                }
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        match self.depth {
            FIELD_DEPTH => {
                if let (Some(capture), Some((record, _))) =
                    (self.capture.take(), self.record.as_mut())
                {
                    if !capture.text.is_empty() {
                        record.set(capture.field, capture.text);
                    }
                }
            }
            DESCRIPTION_DEPTH => {
                if let Some((record, _)) = self.record.take() {
                    if let Some(prefix) = record.prefix.clone() {
                        self.registry.insert(prefix, record);
                    }
                }
            }
            1 => self.root_closed = true,
            _ => {}
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn text(&mut self, text: &str) -> Result<(), ImportError> {
        if self.depth == 0 {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(ImportError::Parse(
                "text found outside the root element".to_string(),
            ));
        }
        if self.depth == FIELD_DEPTH {
            if let Some(capture) = self.capture.as_mut() {
                if !capture.complete {
                    capture.text.push_str(text);
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<RegistryMapping, ImportError> {
        if !self.seen_root {
            return Err(ImportError::Parse("no root element found".to_string()));
        }
        if self.depth > 0 {
            return Err(ImportError::Parse(format!(
                "document ended with {} unclosed element(s)",
                self.depth
            )));
        }
        Ok(self.registry)
    }
}

fn is_description(namespace: Option<&[u8]>, local_name: &[u8]) -> bool {
    let (ns, local) = DESCRIPTION;
    namespace == Some(ns.as_bytes()) && local_name == local.as_bytes()
}
