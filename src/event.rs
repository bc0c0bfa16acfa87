//! Decoded protocol events consumed by the router.
//!
//! The client core does not parse raw IRC lines. A protocol layer (for
//! example a codec over `slirc-proto`) decodes the wire format and hands
//! the router one [`Event`] per message: a sender name, an own-action flag
//! marking actions performed by the local session, and a typed payload.

/// Numeric code for `RPL_NAMREPLY` (NAMES list entry).
///
/// The only numeric with special routing: its target channel sits in the
/// second-to-last parameter rather than parameter index 1.
pub const RPL_NAMREPLY: u16 = 353;

/// A decoded protocol event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Name of the originating user or server.
    pub sender: String,
    /// Whether the local session performed this action.
    pub own: bool,
    /// Type-specific payload.
    pub kind: EventKind,
}

/// The type-specific payload of an [`Event`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A user joined a channel.
    Join {
        /// The joined channel.
        channel: String,
    },
    /// A user left a channel.
    Part {
        /// The parted channel.
        channel: String,
        /// Optional part message.
        reason: Option<String>,
    },
    /// A user was kicked from a channel.
    Kick {
        /// The channel the kick happened in.
        channel: String,
        /// The kicked user's nickname.
        user: String,
        /// Optional kick reason.
        reason: Option<String>,
    },
    /// A user disconnected from the network.
    Quit {
        /// Optional quit message.
        reason: Option<String>,
    },
    /// A user changed nickname.
    Nick {
        /// The new nickname.
        nick: String,
    },
    /// A channel topic change or reply.
    Topic {
        /// The channel whose topic changed.
        channel: String,
        /// The new topic.
        topic: Option<String>,
    },
    /// An end-of-NAMES style names event for a channel.
    Names {
        /// The channel the names belong to.
        channel: String,
        /// The listed names.
        names: Vec<String>,
    },
    /// A mode change on a channel or user.
    Mode {
        /// The channel or nickname the modes apply to.
        target: String,
        /// The raw mode string.
        modes: String,
    },
    /// A NOTICE to a channel or user.
    Notice {
        /// The channel or nickname the notice was sent to.
        target: String,
        /// Notice body, possibly containing formatting codes.
        text: String,
    },
    /// A PRIVMSG to a channel or user.
    Private {
        /// The channel or nickname the message was sent to.
        target: String,
        /// Message body, possibly containing formatting codes.
        text: String,
    },
    /// A numeric server reply.
    Numeric {
        /// The three-digit numeric code.
        code: u16,
        /// Reply parameters, including the leading client parameter.
        params: Vec<String>,
    },
    /// Any other command the protocol layer decoded but this core does
    /// not route.
    Other {
        /// The raw command name.
        command: String,
        /// The command parameters.
        params: Vec<String>,
    },
}

impl Event {
    /// Create an event from a sender and payload, with the own-action
    /// flag cleared.
    pub fn new(sender: impl Into<String>, kind: EventKind) -> Self {
        Self {
            sender: sender.into(),
            own: false,
            kind,
        }
    }

    /// Mark this event as performed by the local session.
    #[must_use]
    pub fn own(mut self) -> Self {
        self.own = true;
        self
    }

    /// Convenience constructor for a join event.
    pub fn join(sender: impl Into<String>, channel: impl Into<String>) -> Self {
        Self::new(
            sender,
            EventKind::Join {
                channel: channel.into(),
            },
        )
    }

    /// Convenience constructor for a part event without a reason.
    pub fn part(sender: impl Into<String>, channel: impl Into<String>) -> Self {
        Self::new(
            sender,
            EventKind::Part {
                channel: channel.into(),
                reason: None,
            },
        )
    }

    /// Convenience constructor for a kick event without a reason.
    pub fn kick(
        sender: impl Into<String>,
        channel: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self::new(
            sender,
            EventKind::Kick {
                channel: channel.into(),
                user: user.into(),
                reason: None,
            },
        )
    }

    /// Convenience constructor for a quit event without a reason.
    pub fn quit(sender: impl Into<String>) -> Self {
        Self::new(sender, EventKind::Quit { reason: None })
    }

    /// Convenience constructor for a nick change event.
    pub fn nick(sender: impl Into<String>, nick: impl Into<String>) -> Self {
        Self::new(sender, EventKind::Nick { nick: nick.into() })
    }

    /// Convenience constructor for a PRIVMSG event.
    pub fn privmsg(
        sender: impl Into<String>,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            sender,
            EventKind::Private {
                target: target.into(),
                text: text.into(),
            },
        )
    }

    /// Convenience constructor for a NOTICE event.
    pub fn notice(
        sender: impl Into<String>,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            sender,
            EventKind::Notice {
                target: target.into(),
                text: text.into(),
            },
        )
    }

    /// Convenience constructor for a numeric reply.
    pub fn numeric(sender: impl Into<String>, code: u16, params: Vec<String>) -> Self {
        Self::new(sender, EventKind::Numeric { code, params })
    }
}
