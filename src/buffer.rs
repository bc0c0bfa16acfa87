//! Buffers and their creation/destruction seams.
//!
//! A buffer is one conversation target: a channel or a private query. The
//! directory owns the buffer records; applications plug in behavior through
//! two traits. [`BufferSink`] receives the events routed to a buffer, and
//! [`BufferFactory`] decides how sinks are built and torn down, which keeps
//! the router independent of any concrete buffer type.

use crate::event::Event;

/// Stable handle to a buffer in the directory.
///
/// Handles are arena indices; they stay valid across insertions and
/// removals of other buffers and are reused only after their buffer is
/// gone.
pub type BufferId = usize;

/// Buffer-local event processing.
pub trait BufferSink {
    /// Process an event routed to this buffer.
    ///
    /// The return value is the "claims" bit: `false` tells the router this
    /// buffer does not own the event, letting dual-target dispatch fall
    /// through to the next candidate.
    fn deliver(&mut self, event: &Event) -> bool;
}

/// Outcome of a destroy request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Teardown {
    /// The buffer is gone; the directory removes it immediately.
    Now,
    /// The factory keeps the buffer alive for now. The owner must call
    /// [`BufferDirectory::buffer_gone`](crate::BufferDirectory::buffer_gone)
    /// once it is actually done with it.
    Deferred,
}

/// Creates and destroys buffer sinks.
///
/// The directory calls [`create`](Self::create) when a new title needs a
/// buffer (a channel being joined, a query opening) and
/// [`destroy`](Self::destroy) when the session leaves one. Both are
/// override points: creation may be vetoed, and destruction may be
/// deferred to keep a parted buffer around.
pub trait BufferFactory {
    /// Build a sink for a buffer with the given title, or `None` to veto
    /// the creation entirely.
    fn create(&mut self, title: &str) -> Option<Box<dyn BufferSink>>;

    /// Handle a destroy request for a buffer.
    ///
    /// The default drops it immediately.
    fn destroy(&mut self, id: BufferId, buffer: &mut Buffer) -> Teardown {
        let _ = (id, buffer);
        Teardown::Now
    }
}

/// A buffer record owned by the directory.
pub struct Buffer {
    title: String,
    sink: Box<dyn BufferSink>,
}

impl Buffer {
    pub(crate) fn new(title: String, sink: Box<dyn BufferSink>) -> Self {
        Self { title, sink }
    }

    /// The display title as originally received, e.g. `#channel` or a
    /// nickname. Case is preserved; lookups fold it.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Access the buffer's sink.
    pub fn sink(&mut self) -> &mut dyn BufferSink {
        self.sink.as_mut()
    }

    pub(crate) fn deliver(&mut self, event: &Event) -> bool {
        self.sink.deliver(event)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer").field("title", &self.title).finish()
    }
}

/// A sink that records every event delivered to it.
///
/// This is the default buffer behavior, and what tests usually want: a
/// transcript of the conversation, claiming every event routed its way.
#[derive(Default)]
pub struct Transcript {
    events: Vec<Event>,
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events delivered so far, in arrival order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl BufferSink for Transcript {
    fn deliver(&mut self, event: &Event) -> bool {
        self.events.push(event.clone());
        true
    }
}

/// Factory producing [`Transcript`] sinks for every title.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranscriptFactory;

impl BufferFactory for TranscriptFactory {
    fn create(&mut self, _title: &str) -> Option<Box<dyn BufferSink>> {
        Some(Box::new(Transcript::new()))
    }
}

/// Adapter installing a closure as a [`BufferFactory`].
///
/// Destroy requests use the default immediate teardown.
pub struct FactoryFn<F>(
    /// The wrapped sink-returning closure.
    pub F,
);

impl<F> BufferFactory for FactoryFn<F>
where
    F: FnMut(&str) -> Option<Box<dyn BufferSink>>,
{
    fn create(&mut self, title: &str) -> Option<Box<dyn BufferSink>> {
        (self.0)(title)
    }
}
