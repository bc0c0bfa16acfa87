//! Pure event classification.
//!
//! [`classify`] maps one decoded event to a delivery strategy, an optional
//! buffer creation, and an optional trailing cleanup. It performs no side
//! effects and consults no state beyond the session's own nickname, which
//! keeps the routing rules independently testable.

use crate::casemap::irc_eq;
use crate::event::{Event, EventKind, RPL_NAMREPLY};

/// How an event should be delivered to buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Deliver to every existing buffer; always counts as handled, even
    /// when the directory is empty.
    Broadcast,
    /// Deliver to the buffer with this title, if any.
    Target(String),
    /// Try the first title; if no buffer claims the event, retry with the
    /// second. Used for mode/notice/private, where the explicit target may
    /// be a channel or our own nickname (in which case the conversation
    /// buffer is named after the sender).
    Either(String, String),
    /// The event is not buffer-specific and is never handled.
    None,
}

/// Trailing cleanup applied after delivery, regardless of its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cleanup {
    /// Nothing to tear down.
    None,
    /// Destroy the buffer with this title.
    Remove(String),
    /// Destroy every buffer in the directory.
    RemoveAll,
}

/// The routing decision for one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// A buffer to create before delivery (the channel of our own join).
    pub creates: Option<String>,
    /// Delivery strategy.
    pub dispatch: Dispatch,
    /// Cleanup to apply after delivery.
    pub cleanup: Cleanup,
}

/// Classify an event against the session's own nickname.
#[must_use]
pub fn classify(event: &Event, own_nick: &str) -> Classification {
    let creates = match &event.kind {
        EventKind::Join { channel } if event.own => Some(channel.clone()),
        _ => None,
    };

    let dispatch = match &event.kind {
        EventKind::Nick { .. } | EventKind::Quit { .. } => Dispatch::Broadcast,

        EventKind::Join { channel }
        | EventKind::Part { channel, .. }
        | EventKind::Kick { channel, .. }
        | EventKind::Names { channel, .. }
        | EventKind::Topic { channel, .. } => Dispatch::Target(channel.clone()),

        EventKind::Mode { target, .. }
        | EventKind::Notice { target, .. }
        | EventKind::Private { target, .. } => {
            Dispatch::Either(target.clone(), event.sender.clone())
        }

        EventKind::Numeric { code, params } => {
            // RPL_NAMREPLY carries the channel second-to-last; everything
            // else keeps it at parameter index 1. A missing parameter
            // degrades to an empty target that matches no buffer.
            let target = if *code == RPL_NAMREPLY {
                params
                    .len()
                    .checked_sub(2)
                    .and_then(|i| params.get(i))
            } else {
                params.get(1)
            };
            Dispatch::Target(target.cloned().unwrap_or_default())
        }

        EventKind::Other { .. } => Dispatch::None,
    };

    let cleanup = match &event.kind {
        EventKind::Part { channel, .. } if event.own => Cleanup::Remove(channel.clone()),
        EventKind::Quit { .. } if event.own => Cleanup::RemoveAll,
        EventKind::Kick { channel, user, .. } if irc_eq(user, own_nick) => {
            Cleanup::Remove(channel.clone())
        }
        _ => Cleanup::None,
    };

    Classification {
        creates,
        dispatch,
        cleanup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_join_creates_and_targets() {
        let c = classify(&Event::join("me", "#rust").own(), "me");
        assert_eq!(c.creates.as_deref(), Some("#rust"));
        assert_eq!(c.dispatch, Dispatch::Target("#rust".into()));
        assert_eq!(c.cleanup, Cleanup::None);
    }

    #[test]
    fn remote_join_does_not_create() {
        let c = classify(&Event::join("alice", "#rust"), "me");
        assert_eq!(c.creates, None);
        assert_eq!(c.dispatch, Dispatch::Target("#rust".into()));
    }

    #[test]
    fn nick_and_quit_broadcast() {
        let c = classify(&Event::nick("alice", "alice2"), "me");
        assert_eq!(c.dispatch, Dispatch::Broadcast);

        let c = classify(&Event::quit("alice"), "me");
        assert_eq!(c.dispatch, Dispatch::Broadcast);
        assert_eq!(c.cleanup, Cleanup::None);
    }

    #[test]
    fn own_quit_removes_all() {
        let c = classify(&Event::quit("me").own(), "me");
        assert_eq!(c.dispatch, Dispatch::Broadcast);
        assert_eq!(c.cleanup, Cleanup::RemoveAll);
    }

    #[test]
    fn own_part_removes_channel() {
        let c = classify(&Event::part("me", "#rust").own(), "me");
        assert_eq!(c.cleanup, Cleanup::Remove("#rust".into()));
    }

    #[test]
    fn kick_self_removes_channel_case_insensitively() {
        let c = classify(&Event::kick("op", "#rust", "ME"), "me");
        assert_eq!(c.cleanup, Cleanup::Remove("#rust".into()));

        let c = classify(&Event::kick("op", "#rust", "alice"), "me");
        assert_eq!(c.cleanup, Cleanup::None);
    }

    #[test]
    fn privmsg_tries_target_then_sender() {
        let c = classify(&Event::privmsg("alice", "me", "hi"), "me");
        assert_eq!(c.dispatch, Dispatch::Either("me".into(), "alice".into()));
    }

    #[test]
    fn namreply_targets_second_to_last_param() {
        let params = vec!["me".into(), "=".into(), "#rust".into(), "a b c".into()];
        let c = classify(&Event::numeric("server", RPL_NAMREPLY, params), "me");
        assert_eq!(c.dispatch, Dispatch::Target("#rust".into()));
    }

    #[test]
    fn other_numerics_target_param_one() {
        let params = vec!["me".into(), "#rust".into(), "topic text".into()];
        let c = classify(&Event::numeric("server", 332, params), "me");
        assert_eq!(c.dispatch, Dispatch::Target("#rust".into()));
    }

    #[test]
    fn numeric_with_missing_param_gets_empty_target() {
        let c = classify(&Event::numeric("server", 1, vec![]), "me");
        assert_eq!(c.dispatch, Dispatch::Target(String::new()));
    }

    #[test]
    fn unknown_commands_are_unclassified() {
        let e = Event::new(
            "server",
            EventKind::Other {
                command: "WALLOPS".into(),
                params: vec!["text".into()],
            },
        );
        assert_eq!(classify(&e, "me").dispatch, Dispatch::None);
    }
}
