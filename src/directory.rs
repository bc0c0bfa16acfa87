//! The buffer directory: an ordered, case-insensitively keyed collection.
//!
//! Three structures are kept in sync and mutated only here: an arena of
//! buffer records addressed by stable [`BufferId`] handles, an
//! insertion-ordered sequence of handles (the externally observable display
//! order), and a case-folded title index. At every observable point the
//! order and the index have identical membership.
//!
//! State changes surface as [`Notification`] values queued on the
//! directory; callers drain them after each operation (or batch of
//! operations) with [`BufferDirectory::drain_notifications`].

use std::collections::HashMap;

use tracing::debug;

use crate::buffer::{Buffer, BufferFactory, BufferId, Teardown};
use crate::casemap::irc_to_lower;
use crate::event::Event;

/// A committed state change, reported to the embedding application.
///
/// Aggregate [`DirectoryChanged`](Notification::DirectoryChanged)
/// notifications are emitted exactly once per logical batch: once per add,
/// once per removal, and once for a whole [`clear`](BufferDirectory::clear).
#[derive(Debug)]
#[non_exhaustive]
pub enum Notification {
    /// A buffer was inserted at the tail of the display order.
    BufferAdded(BufferId),
    /// A buffer was removed from the directory.
    BufferRemoved {
        /// Handle the buffer had; no longer valid.
        id: BufferId,
        /// The removed buffer's display title.
        title: String,
    },
    /// No buffer claimed a routed event.
    ///
    /// Buffer-specific events are delivered to their buffers; this hook
    /// hands everything else to the application.
    MessageIgnored(Event),
    /// The set of buffers changed.
    DirectoryChanged {
        /// Display titles in display order.
        titles: Vec<String>,
        /// Number of buffers.
        count: usize,
    },
}

/// Ordered collection of buffers, keyed case-insensitively by title.
pub struct BufferDirectory {
    factory: Box<dyn BufferFactory>,
    slots: Vec<Option<Buffer>>,
    free: Vec<BufferId>,
    order: Vec<BufferId>,
    index: HashMap<String, BufferId>,
    pending: Vec<Notification>,
}

impl BufferDirectory {
    /// Create an empty directory using the given buffer factory.
    #[must_use]
    pub fn new(factory: Box<dyn BufferFactory>) -> Self {
        Self {
            factory,
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            index: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Look up a buffer handle by title, case-insensitively.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<BufferId> {
        self.index.get(&irc_to_lower(title)).copied()
    }

    /// Whether a buffer with this title exists, case-insensitively.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.find(title).is_some()
    }

    /// Access a buffer by handle.
    #[must_use]
    pub fn get(&self, id: BufferId) -> Option<&Buffer> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Mutable access to a buffer by handle.
    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    /// Buffer handles in display order.
    pub fn buffers(&self) -> impl Iterator<Item = BufferId> + '_ {
        self.order.iter().copied()
    }

    /// Display titles in display order.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|&id| self.get(id))
            .map(|b| b.title().to_string())
            .collect()
    }

    /// Number of buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Take the notifications accumulated since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn push_notification(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    /// Add a buffer for `title`, or return the existing one.
    ///
    /// Adding a title that already exists (in any case variant) is
    /// idempotent: the existing handle is returned and nothing is emitted.
    /// Returns `None` when the factory vetoes the creation.
    pub fn add(&mut self, title: &str) -> Option<BufferId> {
        let key = irc_to_lower(title);
        if let Some(&id) = self.index.get(&key) {
            return Some(id);
        }

        let sink = self.factory.create(title)?;
        let id = self.insert(Buffer::new(title.to_string(), sink), key);
        debug!(title, id, "buffer added");
        self.pending.push(Notification::BufferAdded(id));
        self.push_changed();
        Some(id)
    }

    /// Request removal of the buffer with `title`.
    ///
    /// Unknown titles are a no-op. The factory's destroy hook runs first;
    /// if it defers the teardown, the buffer stays in the directory until
    /// [`buffer_gone`](Self::buffer_gone) is called for it.
    pub fn remove(&mut self, title: &str) {
        let Some(id) = self.find(title) else {
            return;
        };
        let Some(buffer) = self.slots.get_mut(id).and_then(Option::as_mut) else {
            return;
        };
        match self.factory.destroy(id, buffer) {
            Teardown::Now => self.buffer_gone(id),
            Teardown::Deferred => debug!(title, id, "buffer teardown deferred"),
        }
    }

    /// Finish removing a buffer.
    ///
    /// This is the only point that takes a buffer out of the order and the
    /// index. Unknown or already-removed handles are a no-op.
    pub fn buffer_gone(&mut self, id: BufferId) {
        let Some(buffer) = self.slots.get_mut(id).and_then(Option::take) else {
            return;
        };
        self.order.retain(|&o| o != id);
        self.index.remove(&irc_to_lower(buffer.title()));
        self.free.push(id);
        debug!(title = buffer.title(), id, "buffer removed");
        self.pending.push(Notification::BufferRemoved {
            id,
            title: buffer.title().to_string(),
        });
        self.push_changed();
    }

    /// Change a buffer's title, refreshing its index key.
    ///
    /// The position in the display order is unchanged; only the
    /// case-folded key moves. Unknown handles are a no-op.
    pub fn rename(&mut self, id: BufferId, new_title: &str) {
        let Some(buffer) = self.slots.get_mut(id).and_then(Option::as_mut) else {
            return;
        };
        let old_key = irc_to_lower(buffer.title());
        buffer.set_title(new_title.to_string());
        self.index.remove(&old_key);
        self.index.insert(irc_to_lower(new_title), id);
        self.push_changed();
    }

    /// Destroy and remove every buffer.
    ///
    /// The destroy hook runs for each buffer, but the reset is
    /// unconditional: deferred teardowns cannot keep a record in a cleared
    /// directory. One aggregate change is emitted for the whole batch, not
    /// one per removal.
    pub fn clear(&mut self) {
        if self.order.is_empty() {
            return;
        }
        for id in std::mem::take(&mut self.order) {
            if let Some(mut buffer) = self.slots.get_mut(id).and_then(Option::take) {
                let _ = self.factory.destroy(id, &mut buffer);
                self.index.remove(&irc_to_lower(buffer.title()));
                self.free.push(id);
                self.pending.push(Notification::BufferRemoved {
                    id,
                    title: buffer.title().to_string(),
                });
            }
        }
        debug!("directory cleared");
        self.push_changed();
    }

    /// Deliver an event to the buffer with `title`, if any.
    ///
    /// Returns the buffer's claim bit, or `false` when no buffer matched.
    pub(crate) fn deliver_to(&mut self, title: &str, event: &Event) -> bool {
        match self.find(title) {
            Some(id) => self
                .get_mut(id)
                .map(|buffer| buffer.deliver(event))
                .unwrap_or(false),
            None => false,
        }
    }

    /// Deliver an event to every buffer, in display order.
    pub(crate) fn deliver_all(&mut self, event: &Event) {
        let ids: Vec<BufferId> = self.order.clone();
        for id in ids {
            if let Some(buffer) = self.get_mut(id) {
                buffer.deliver(event);
            }
        }
    }

    fn insert(&mut self, buffer: Buffer, key: String) -> BufferId {
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(buffer);
                id
            }
            None => {
                self.slots.push(Some(buffer));
                self.slots.len() - 1
            }
        };
        self.order.push(id);
        self.index.insert(key, id);
        id
    }

    fn push_changed(&mut self) {
        self.pending.push(Notification::DirectoryChanged {
            titles: self.titles(),
            count: self.order.len(),
        });
    }

    #[cfg(test)]
    pub(crate) fn check_consistency(&self) {
        assert_eq!(self.order.len(), self.index.len());
        for id in &self.order {
            let buffer = self.get(*id).expect("ordered handle has a live slot");
            assert_eq!(self.index.get(&irc_to_lower(buffer.title())), Some(id));
        }
    }
}

impl std::fmt::Debug for BufferDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferDirectory")
            .field("titles", &self.titles())
            .finish()
    }
}
