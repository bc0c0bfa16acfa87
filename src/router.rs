//! The message router.
//!
//! One event at a time: classify, create the self-joined buffer if needed,
//! deliver, report unclaimed events as ignored, then apply trailing
//! part/quit/kick cleanups. Creation happens before delivery so a
//! just-joined channel's buffer sees its own join; cleanup happens after
//! delivery so a parted or kicked buffer still renders the event that
//! removed it.

use tracing::{debug, trace};

use crate::buffer::BufferFactory;
use crate::classify::{classify, Cleanup, Dispatch};
use crate::directory::{BufferDirectory, Notification};
use crate::error::{ClientError, Result};
use crate::event::Event;

/// The outcome of routing one event.
#[derive(Debug)]
pub struct RouteOutcome {
    /// Whether any buffer claimed the event (broadcasts always do).
    pub handled: bool,
    /// State changes committed while routing, in commit order.
    pub notifications: Vec<Notification>,
}

/// Routes decoded protocol events into a [`BufferDirectory`].
pub struct Router {
    directory: BufferDirectory,
    nickname: Option<String>,
}

impl Router {
    /// Create a router over an empty directory using the given factory.
    #[must_use]
    pub fn new(factory: Box<dyn BufferFactory>) -> Self {
        Self {
            directory: BufferDirectory::new(factory),
            nickname: None,
        }
    }

    /// Bind the session identity (the local nickname).
    ///
    /// The kick-self check and routing depend on a single session identity
    /// for the lifetime of the directory, so rebinding an already-bound
    /// router is an immediate [`ClientError::SessionRebound`].
    pub fn bind_session(&mut self, nickname: impl Into<String>) -> Result<()> {
        if self.nickname.is_some() {
            return Err(ClientError::SessionRebound);
        }
        self.nickname = Some(nickname.into());
        Ok(())
    }

    /// The bound nickname, if any.
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    /// The directory this router mutates.
    #[must_use]
    pub fn directory(&self) -> &BufferDirectory {
        &self.directory
    }

    /// Mutable access to the directory, for application-driven changes
    /// (explicit removals, renames, deferred teardown completion).
    pub fn directory_mut(&mut self) -> &mut BufferDirectory {
        &mut self.directory
    }

    /// Route one event to completion.
    ///
    /// Errors only when no session is bound; every routing condition short
    /// of that is a policy outcome reported through the returned
    /// [`RouteOutcome`].
    pub fn route(&mut self, event: &Event) -> Result<RouteOutcome> {
        let nickname = self
            .nickname
            .as_deref()
            .ok_or(ClientError::SessionNotBound)?;
        let decision = classify(event, nickname);
        trace!(?decision, "classified event");

        if let Some(title) = &decision.creates {
            self.directory.add(title);
        }

        let handled = match &decision.dispatch {
            Dispatch::Broadcast => {
                self.directory.deliver_all(event);
                true
            }
            Dispatch::Target(title) => self.directory.deliver_to(title, event),
            Dispatch::Either(first, second) => {
                self.directory.deliver_to(first, event)
                    || self.directory.deliver_to(second, event)
            }
            Dispatch::None => false,
        };

        if !handled {
            debug!(kind = ?event.kind, "event ignored");
            self.directory
                .push_notification(Notification::MessageIgnored(event.clone()));
        }

        match decision.cleanup {
            Cleanup::None => {}
            Cleanup::Remove(title) => self.directory.remove(&title),
            Cleanup::RemoveAll => self.directory.clear(),
        }

        Ok(RouteOutcome {
            handled,
            notifications: self.directory.drain_notifications(),
        })
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("nickname", &self.nickname)
            .field("directory", &self.directory)
            .finish()
    }
}
