//! [`EventSource`] over an XML response body.

use crate::error::TransportError;
use crate::events::{Attributes, EventSource, ParseEvent};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Reads parse events from XML with `quick-xml`.
///
/// Self-closing elements (`<artist id="1"/>`) produce a start event followed
/// by an end event, so consumers never have to care which form the server
/// used. Text, comments and declarations are skipped.
pub struct XmlEventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending_end: bool,
    finished: bool,
}

impl<R: BufRead> XmlEventSource<R> {
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            pending_end: false,
            finished: false,
        }
    }
}

impl<'a> XmlEventSource<&'a [u8]> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<R: BufRead> EventSource for XmlEventSource<R> {
    fn next_event(&mut self) -> Result<ParseEvent, TransportError> {
        if self.pending_end {
            self.pending_end = false;
            return Ok(ParseEvent::End);
        }
        if self.finished {
            return Ok(ParseEvent::EndOfDocument);
        }

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => return start_event(&e),
                Event::Empty(e) => {
                    let event = start_event(&e)?;
                    self.pending_end = true;
                    return Ok(event);
                }
                Event::End(_) => return Ok(ParseEvent::End),
                Event::Eof => {
                    self.finished = true;
                    return Ok(ParseEvent::EndOfDocument);
                }
                _ => {}
            }
        }
    }
}

fn start_event(element: &BytesStart<'_>) -> Result<ParseEvent, TransportError> {
    let name = local_name(element.name().local_name().as_ref());
    let mut attributes = Attributes::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = local_name(attr.key.local_name().as_ref());
        let value = attr.unescape_value()?;
        attributes.insert(key, value.into_owned());
    }
    Ok(ParseEvent::Start { name, attributes })
}

fn local_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
