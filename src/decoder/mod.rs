#![doc = r#"
Turning an event stream into a [`Project`].

# Overview

The decoder makes one forward pass. Each event is read raw, then routed by
its width class to a handler that interprets it against the
[`ParserContext`]: the channel, pattern, insert, slot, track or time marker
selected by an earlier boundary event.

Two pieces of context change how later events read:

- the version event switches text to UTF-16 for 11.5 and later and fixes the
  sizes of the insert and track arrays;
- the first insert-flags event moves the decoder into [`Scope::Mixer`], after
  which the ids shared between channels and effect slots address the slot.

# Errors

Container and framing problems, truncation and references into unsized
arrays are fatal [`DecodeError`]s. Everything else (unknown ids, dangling
indices, short payloads) is recorded as an [`Anomaly`] and decoding goes on,
unless [`DecodeOptions::strict`] is set, which makes dangling references
fatal too.

```
# use flparse::prelude::*;
let mut writer = EventWriter::new(ProjectHeader::new(1, 96).unwrap());
writer.text(EventId::Version, "20.8.4").unwrap();
writer.text(EventId::Title, "Untitled").unwrap();
let project = decode(&writer.finish(), &DecodeOptions::default()).unwrap();
assert_eq!(project.title, "Untitled");
assert_eq!(project.tracks.len(), 502);
```
"#]

mod anomaly;
pub use anomaly::*;

mod context;
pub use context::*;

mod options;
pub use options::*;

mod version;
pub use version::*;

mod data;
mod fixed;
mod text;

use crate::{
    TextEncoding,
    event::{Event, EventId},
    file::read_container,
    project::{Channel, GeneratorData, Project},
    reader::{Collection, DecodeError, DecodeResult, RangeError, Reader},
};

/// A decoded project and what went wrong along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// The project
    pub project: Project,
    /// Recoverable problems, in stream order
    pub anomalies: Vec<Anomaly>,
}

/// Decode a whole project file.
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> DecodeResult<Project> {
    decode_with_diagnostics(bytes, options).map(|decoded| decoded.project)
}

/// Decode a whole project file, keeping the recoverable anomalies.
pub fn decode_with_diagnostics(bytes: &[u8], options: &DecodeOptions) -> DecodeResult<Decoded> {
    ProjectDecoder::new(bytes, options)?.run()
}

/// A step-by-step project decoder
pub struct ProjectDecoder<'a> {
    reader: Reader<'a>,
    ctx: ParserContext,
    project: Project,
    options: DecodeOptions,
    anomalies: Vec<Anomaly>,
    event_at: usize,
    event_id: u8,
}

impl<'a> ProjectDecoder<'a> {
    /// Validate the container and position the decoder on the first event.
    pub fn new(bytes: &'a [u8], options: &DecodeOptions) -> DecodeResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let header = read_container(&mut reader)?;
        Ok(Self {
            reader,
            ctx: ParserContext::default(),
            project: Project::from_header(&header),
            options: *options,
            anomalies: Vec::new(),
            event_at: 0,
            event_id: 0,
        })
    }

    /// Decode one event. Returns `false` once the stream is exhausted.
    pub fn step(&mut self) -> DecodeResult<bool> {
        self.event_at = self.reader.buffer_position();
        let Some(event) = self.reader.read_event()? else {
            return Ok(false);
        };
        self.event_id = event.id();
        self.project.event_count += 1;

        if self.options.is_verbose() {
            tracing::trace!(position = self.event_at, id = event.id(), ?event, "event");
        }

        let Some(id) = event.known_id() else {
            self.report(AnomalyKind::UnknownEvent)?;
            return Ok(true);
        };

        match event {
            Event::Byte { value, .. } => self.on_byte(id, value)?,
            Event::Word { value, .. } => self.on_word(id, value)?,
            Event::DWord { value, .. } => self.on_dword(id, value)?,
            Event::Text { payload, .. } => {
                // the version string stays single-byte in every release
                let encoding = match id {
                    EventId::Version => TextEncoding::Narrow,
                    _ => self.ctx.text,
                };
                self.on_text(id, encoding.decode(payload))?
            }
            Event::Data { payload, .. } if id.is_text_payload() => {
                let text = self.ctx.text.decode(payload);
                self.on_text(id, text)?
            }
            Event::Data { payload, .. } => {
                let base = self.reader.buffer_position() - payload.len();
                self.on_data(id, payload, base)?
            }
        }
        Ok(true)
    }

    /// Close any pending entity and hand back the project.
    pub fn finish(mut self) -> DecodeResult<Decoded> {
        self.event_at = self.reader.buffer_position();
        if let Some(marker) = self.ctx.time_marker.take() {
            self.report(AnomalyKind::UnterminatedTimeMarker)?;
            self.project.time_markers.push(marker);
        }
        if self.ctx.slot.take().is_some() {
            self.report(AnomalyKind::UnplacedSlot)?;
        }
        Ok(Decoded {
            project: self.project,
            anomalies: self.anomalies,
        })
    }

    /// Decode every remaining event, then [`finish`](Self::finish).
    pub fn run(mut self) -> DecodeResult<Decoded> {
        while self.step()? {}
        self.finish()
    }

    /// The parser context
    pub fn context(&self) -> &ParserContext {
        &self.ctx
    }

    /// The project decoded so far
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Anomalies recorded so far
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Record a recoverable problem, or fail in strict mode.
    fn report(&mut self, kind: AnomalyKind) -> DecodeResult<()> {
        if let AnomalyKind::Dangling(reference) = kind {
            if self.options.is_strict() {
                return Err(DecodeError::dangling(self.event_at, reference));
            }
        }
        tracing::debug!(position = self.event_at, id = self.event_id, %kind, "anomaly");
        self.anomalies.push(Anomaly {
            position: self.event_at,
            event: self.event_id,
            kind,
        });
        Ok(())
    }

    /// Sizes of the insert and track arrays; referencing them before a
    /// version event is fatal.
    fn limits(&self, collection: Collection) -> DecodeResult<Limits> {
        self.ctx
            .limits
            .ok_or_else(|| DecodeError::range(self.event_at, RangeError::Unsized(collection)))
    }

    /// Apply `f` to the current channel. Silent in mixer scope.
    fn with_channel(&mut self, f: impl FnOnce(&mut Channel)) -> DecodeResult<()> {
        if self.ctx.scope == Scope::Mixer {
            return Ok(());
        }
        let Some(channel) = self
            .ctx
            .channel
            .and_then(|i| self.project.channels.get_mut(i))
        else {
            return self.report(Reference::NoSelection(Entity::Channel).into());
        };
        f(channel);
        Ok(())
    }

    /// Apply `f` to the current channel's generator data, if it has any.
    fn with_generator(&mut self, f: impl FnOnce(&mut GeneratorData)) -> DecodeResult<()> {
        self.with_channel(|channel| {
            if let Some(generator) = channel.data.as_generator_mut() {
                f(generator);
            }
        })
    }

    /// Turn a truncated payload read into a short-payload anomaly.
    fn payload<T>(&mut self, parsed: DecodeResult<T>, length: usize) -> DecodeResult<Option<T>> {
        match parsed {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_truncated() => {
                self.report(AnomalyKind::ShortPayload(length))?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Handle an id that is known but not modelled.
    fn ignore(&self, id: EventId) {
        if self.options.is_verbose() {
            tracing::trace!(position = self.event_at, ?id, "not modelled");
        }
    }
}
