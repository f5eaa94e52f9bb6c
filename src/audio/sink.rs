//! Opening sound files as `rodio` sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::types::AudioError;

/// Create a paused `Sink` playing `path` from the start.
pub(super) fn create_sink(stream: &OutputStream, path: &Path) -> Result<Sink, AudioError> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
