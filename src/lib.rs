#![doc = r#"
A decoder for FL Studio project files (`.flp`), built for humans.

The format is an undocumented, reverse-engineered event stream. A project file
is a small `FLhd` header chunk followed by an `FLdt` chunk holding a flat
sequence of events. Each event is an id byte followed by a payload whose width
is implied by the id's range. Structure (which channel a field belongs to,
which insert a slot sits in) is carried by event *order*, not nesting, so the
decoder threads a [`ParserContext`](crate::decoder::ParserContext) through the
stream.

# Decoding a project
```rust
# use flparse::prelude::*;
# fn demo(bytes: &[u8]) -> DecodeResult<()> {
let project = Project::parse(bytes)?;

for channel in &project.channels {
    println!("{}: {}", channel.id, channel.name);
}
# Ok(())
# }
```

# Strict decoding and diagnostics
Index-based references that point outside their collection are recoverable
anomalies by default. Use [`DecodeOptions::strict`](crate::decoder::DecodeOptions::strict)
to turn them into errors, or [`decode_with_diagnostics`] to inspect them.

# Building streams
The [`writer`] module emits events with the same framing, which is handy for
tests and for tools that patch project metadata.
"#]
#![warn(missing_docs)]

pub mod decoder;
pub mod event;
pub mod file;
pub mod plugin;
pub mod project;
pub mod reader;
mod text;
pub mod varint;
pub mod writer;

pub use decoder::{decode, decode_with_diagnostics};
pub use text::TextEncoding;

#[doc = r#"
Common re-exports
"#]
pub mod prelude {
    pub use crate::{
        TextEncoding,
        decoder::{
            Anomaly, AnomalyKind, DecodeOptions, Decoded, Entity, Limits, ParserContext,
            ProjectDecoder, Reference, Scope, Version, decode, decode_with_diagnostics,
        },
        event::{Event, EventId, EventKind},
        file::ProjectHeader,
        plugin::{Plugin, PluginError},
        project::*,
        reader::{
            Collection, ContainerError, DecodeError, DecodeErrorKind, DecodeResult, RangeError,
            Reader,
        },
        writer::{EncodeError, EventWriter, encode},
    };
}
