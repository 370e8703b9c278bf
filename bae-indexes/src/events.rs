use crate::error::TransportError;

/// Attributes of one element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Value of the named attribute. The first occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Owned copy of the named attribute, for building records.
    pub fn get_owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One structural event from a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    Start { name: String, attributes: Attributes },
    End,
    EndOfDocument,
}

impl ParseEvent {
    pub fn start<K, V>(name: &str, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        ParseEvent::Start {
            name: name.to_string(),
            attributes: attributes.into_iter().collect(),
        }
    }
}

/// Forward-only source of parse events.
///
/// Called repeatedly until it yields [`ParseEvent::EndOfDocument`]. Each call
/// may block on I/O.
pub trait EventSource {
    fn next_event(&mut self) -> Result<ParseEvent, TransportError>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Result<ParseEvent, TransportError> {
        (**self).next_event()
    }
}

/// Replays a recorded list of events.
///
/// Yields `EndOfDocument` once the list is exhausted, so a recording does not
/// need to end with one.
#[derive(Debug, Clone, Default)]
pub struct RecordedEvents {
    events: std::collections::VecDeque<ParseEvent>,
}

impl RecordedEvents {
    pub fn new(events: impl IntoIterator<Item = ParseEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for RecordedEvents {
    fn next_event(&mut self) -> Result<ParseEvent, TransportError> {
        Ok(self.events.pop_front().unwrap_or(ParseEvent::EndOfDocument))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_first_occurrence_wins() {
        let attrs: Attributes = [("id", "1"), ("name", "Abba"), ("id", "2")]
            .into_iter()
            .collect();
        assert_eq!(attrs.get("id"), Some("1"));
        assert_eq!(attrs.get("name"), Some("Abba"));
        assert_eq!(attrs.get("missing"), None);
        assert_eq!(attrs.len(), 3);
    }

    #[test]
    fn recorded_events_end_with_end_of_document() {
        let mut source = RecordedEvents::new(vec![ParseEvent::start("indexes", [("a", "b")])]);
        assert!(matches!(
            source.next_event().unwrap(),
            ParseEvent::Start { ref name, .. } if name == "indexes"
        ));
        assert_eq!(source.next_event().unwrap(), ParseEvent::EndOfDocument);
        assert_eq!(source.next_event().unwrap(), ParseEvent::EndOfDocument);
    }
}
