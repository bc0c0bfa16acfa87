//! # slirc-client
//!
//! Client-side core for IRC clients: buffer tracking, message routing and
//! text formatting. A protocol layer decodes the wire format; this crate
//! takes over from there, maintaining one buffer per conversation target
//! (channels and private queries), routing each decoded event to the
//! buffers it concerns, and rendering mIRC-style formatting codes.
//!
//! ## Features
//!
//! - Insertion-ordered buffer directory with case-insensitive titles
//! - Event router handling creation, delivery, broadcasts and teardown
//! - Pluggable buffer factory with veto and deferred-destruction hooks
//! - Formatting-code scanner producing styled runs, plain text or HTML
//! - URL detection with a configurable pattern
//!
//! ## Quick Start
//!
//! ### Routing events
//!
//! ```rust
//! use slirc_client::{Event, Router, TranscriptFactory};
//!
//! let mut router = Router::new(Box::new(TranscriptFactory));
//! router.bind_session("mynick").expect("fresh router");
//!
//! // Our own join creates a buffer and delivers the join to it.
//! let outcome = router.route(&Event::join("mynick", "#rust").own()).unwrap();
//! assert!(outcome.handled);
//! assert!(router.directory().contains("#Rust"));
//!
//! // A channel message lands in the channel's buffer.
//! let outcome = router.route(&Event::privmsg("alice", "#rust", "hi")).unwrap();
//! assert!(outcome.handled);
//! ```
//!
//! ### Rendering formatted text
//!
//! ```rust
//! use slirc_client::format::TextFormat;
//!
//! let format = TextFormat::new();
//! assert_eq!(format.to_plain_text("\x02bold\x0f text"), "bold text");
//! assert_eq!(
//!     format.to_html("\x034red\x0f www.fi"),
//!     "<span style='color:red'>red</span> <a href='http://www.fi'>www.fi</a>"
//! );
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod buffer;
pub mod casemap;
pub mod classify;
pub mod directory;
pub mod error;
pub mod event;
pub mod format;
pub mod router;

pub use self::buffer::{
    Buffer, BufferFactory, BufferId, BufferSink, FactoryFn, Teardown, Transcript,
    TranscriptFactory,
};
pub use self::casemap::{irc_eq, irc_to_lower};
pub use self::classify::{classify, Classification, Cleanup, Dispatch};
pub use self::directory::{BufferDirectory, Notification};
pub use self::error::{ClientError, Result};
pub use self::event::{Event, EventKind, RPL_NAMREPLY};
pub use self::format::{Style, StyledRun, StyledText, TextFormat};
pub use self::router::{RouteOutcome, Router};
