use crate::decoder::decode;
use crate::entry::{AttributeEntryDecoder, EntryDecoder};
use crate::error::IndexesError;
use crate::events::{EventSource, ParseEvent};
use crate::merge::IndexAccumulator;
use crate::preferences::PreferencesStore;
use crate::progress::ProgressSink;
use crate::validate::{EnvelopeValidator, StreamState, StructuralValidator};
use crate::xml_source::XmlEventSource;
use bae_common::IndexesUpdate;
use std::io::BufRead;
use std::time::Instant;
use tracing::debug;

/// Parser for `getIndexes` / `getArtists` responses.
///
/// Each call to [`parse`](Self::parse) consumes one complete event stream.
/// The ignored-articles setting found in the response is written to the
/// preferences store only after the whole stream has been read and
/// validated, so a failed parse never leaves a partial write behind.
pub struct IndexesParser<P: PreferencesStore> {
    preferences: P,
    entries: Box<dyn EntryDecoder>,
    validator: Box<dyn StructuralValidator>,
}

impl<P: PreferencesStore> IndexesParser<P> {
    pub fn new(preferences: P) -> Self {
        Self {
            preferences,
            entries: Box::new(AttributeEntryDecoder),
            validator: Box::new(EnvelopeValidator),
        }
    }

    pub fn with_entry_decoder(mut self, decoder: impl EntryDecoder + 'static) -> Self {
        self.entries = Box::new(decoder);
        self
    }

    pub fn with_validator(mut self, validator: impl StructuralValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn parse<S: EventSource>(
        &self,
        mut source: S,
        progress: &dyn ProgressSink,
    ) -> Result<IndexesUpdate, IndexesError> {
        let started = Instant::now();
        let mut state = StreamState::default();
        let mut acc = IndexAccumulator::new();

        loop {
            let event = source.next_event()?;
            state.observe(&event);
            match event {
                ParseEvent::Start { name, attributes } => {
                    let record = decode(&name, &attributes, self.entries.as_ref());
                    acc.apply(record, progress)?;
                }
                ParseEvent::End => {}
                ParseEvent::EndOfDocument => break,
            }
        }

        self.validator.validate(&state)?;

        let artist_count = acc.artist_count();
        let update = acc.finish(&self.preferences, progress);

        if update.is_unchanged() {
            debug!("Index response carried no index ({} elements)", state.elements);
        } else {
            debug!(
                "Got {} artist(s) in {}ms.",
                artist_count,
                started.elapsed().as_millis()
            );
        }

        Ok(update)
    }

    /// Parse an XML response body.
    pub fn parse_xml<R: BufRead>(
        &self,
        input: R,
        progress: &dyn ProgressSink,
    ) -> Result<IndexesUpdate, IndexesError> {
        self.parse(XmlEventSource::new(input), progress)
    }
}
