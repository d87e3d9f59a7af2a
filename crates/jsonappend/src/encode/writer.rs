use std::io::{self, Write};

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    Result,
    encode::{encoders, primitives, string, time},
    error::Error,
    number,
    options::WriterOptions,
    value::Value,
};

enum State {
    Ready,
    /// The first error seen; every later call is a no-op until `reset`.
    Failed(Error),
}

/// The wrapped sink. Once the writer fails it swallows everything, so bytes
/// still buffered at that point never reach `inner`, not even when the
/// `BufWriter` flushes on drop.
struct Sink<W> {
    inner: W,
    discard: bool,
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.discard {
            return Ok(buf.len());
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.discard {
            return Ok(());
        }
        self.inner.flush()
    }
}

impl<W> Sink<W> {
    fn new(inner: W) -> Self {
        Sink {
            inner,
            discard: false,
        }
    }
}

/// Buffered JSON writer with a sticky error.
///
/// Each method encodes one value (or raw bytes) into the sink. The first
/// failure is latched and turns every following call into a no-op, so
/// callers only need to check [`flush`](Self::flush) at the end. Nothing is
/// written until the internal buffer fills or `flush` is called. Bytes
/// buffered when the error is latched are dropped, also when the writer
/// itself is dropped.
///
/// A writer is meant for a single producer; it does no locking.
pub struct JsonWriter<W: Write> {
    state: State,
    sink: io::BufWriter<Sink<W>>,
    scratch: Vec<u8>,
    options: WriterOptions,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, WriterOptions::default())
    }

    pub fn with_options(inner: W, options: WriterOptions) -> Self {
        Self {
            state: State::Ready,
            sink: io::BufWriter::with_capacity(options.capacity, Sink::new(inner)),
            scratch: Vec::with_capacity(options.scratch_capacity),
            options,
        }
    }

    /// The latched error, if any.
    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            State::Ready => None,
            State::Failed(err) => Some(err),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, State::Failed(_))
    }

    /// Writes buffered bytes through to the sink.
    ///
    /// Once an error is latched this returns it again without touching the
    /// sink.
    pub fn flush(&mut self) -> Result<()> {
        if let State::Failed(err) = &self.state {
            return Err(err.clone());
        }
        if let Err(err) = self.sink.flush() {
            self.latch(err.into());
        }
        match &self.state {
            State::Ready => Ok(()),
            State::Failed(err) => Err(err.clone()),
        }
    }

    /// Clears the latched error and starts writing to `inner`.
    ///
    /// Bytes still buffered for the previous sink are discarded; the previous
    /// sink is returned.
    pub fn reset(&mut self, inner: W) -> W {
        let fresh = io::BufWriter::with_capacity(self.options.capacity, Sink::new(inner));
        let (previous, unflushed) = std::mem::replace(&mut self.sink, fresh).into_parts();
        trace!(
            discarded = unflushed.map_or(0, |b| b.len()),
            was_failed = self.is_failed(),
            "json writer reset"
        );
        self.state = State::Ready;
        self.scratch.clear();
        previous.inner
    }

    pub fn get_ref(&self) -> &W {
        &self.sink.get_ref().inner
    }

    /// Flushes and returns the sink.
    ///
    /// A failed writer returns the latched error; its buffered bytes are
    /// discarded, not written.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        self.sink
            .into_inner()
            .map(|sink| sink.inner)
            .map_err(|err| Error::from(err.into_error()))
    }

    pub fn write_raw(&mut self, val: &[u8]) {
        if self.is_failed() {
            return;
        }
        if let Err(err) = self.sink.write_all(val) {
            self.latch(err.into());
        }
    }

    pub fn write_raw_str(&mut self, val: &str) {
        self.write_raw(val.as_bytes());
    }

    pub fn write_raw_byte(&mut self, val: u8) {
        self.write_raw(&[val]);
    }

    pub fn write_i64(&mut self, val: i64) {
        self.encode(|buf| {
            primitives::append_i64(buf, val);
            Ok(())
        });
    }

    pub fn write_u64(&mut self, val: u64) {
        self.encode(|buf| {
            primitives::append_u64(buf, val);
            Ok(())
        });
    }

    pub fn write_bool(&mut self, val: bool) {
        self.write_raw_str(primitives::format_bool(val));
    }

    pub fn write_null(&mut self) {
        self.write_raw_str(primitives::format_null());
    }

    pub fn write_f64(&mut self, val: f64) {
        self.encode(|buf| number::append_f64(buf, val));
    }

    pub fn write_time<Tz: TimeZone>(&mut self, val: &DateTime<Tz>) {
        self.encode(|buf| time::append_time(buf, val));
    }

    pub fn write_str(&mut self, val: &str) {
        self.encode(|buf| {
            string::append_str(buf, val);
            Ok(())
        });
    }

    /// Writes `"name":`.
    pub fn write_field_name(&mut self, name: &str) {
        self.encode(|buf| {
            primitives::append_field_name(buf, name);
            Ok(())
        });
    }

    pub fn write_value(&mut self, val: &Value) {
        self.encode(|buf| encoders::append_value(buf, val));
    }

    pub fn write_object<'a, I, K>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, &'a Value)>,
        K: AsRef<str>,
    {
        self.encode(|buf| encoders::append_object(buf, entries));
    }

    pub fn write_array<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a Value>,
    {
        self.encode(|buf| encoders::append_array(buf, items));
    }

    pub fn write_serialize<T: Serialize + ?Sized>(&mut self, val: &T) {
        self.encode(|buf| crate::ser::append_serialize(buf, val));
    }

    /// Encodes into the scratch buffer, then hands the complete value to the
    /// sink. A failed encode writes nothing.
    fn encode<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        if self.is_failed() {
            return;
        }
        self.scratch.clear();
        let res = f(&mut self.scratch)
            .and_then(|()| self.sink.write_all(&self.scratch).map_err(Error::from));
        if let Err(err) = res {
            self.latch(err);
        }
    }

    fn latch(&mut self, err: Error) {
        debug!(error = %err, "json writer failed; ignoring writes until reset");
        self.sink.get_mut().discard = true;
        self.state = State::Failed(err);
    }
}
