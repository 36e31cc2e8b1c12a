//! Outbound notifications from the engine to its host.
//!
//! The engine never loads assets itself: it asks the host for them and tells
//! it about taps and animation state through a [`HostPort`]. Most messages
//! are fire-and-forget and may be dropped under backpressure; taps use a
//! blocking send so the host observes them in order.

use std::fmt;

use async_channel::{Receiver, Sender, TryRecvError, TrySendError};

/// Everything the engine tells the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostMessage {
    /// The indexed card became visible without a texture.
    RequestTexture(usize),
    /// The indexed card became visible without a detail texture.
    RequestDetailTexture(usize),
    /// The indexed card became visible without geometry.
    RequestGeometry(usize),
    /// The indexed card left the view; its texture may be released.
    InvalidateTexture(usize),
    /// The indexed card left the view; its detail texture may be released.
    InvalidateDetailTexture(usize),
    /// The indexed card left the view; its geometry may be released.
    InvalidateGeometry(usize),
    /// The indexed card was tapped.
    CardSelected(usize),
    /// The indexed card was long-pressed.
    CardLongPressed(usize),
    /// Rendering became continuous.
    AnimationStarted,
    /// Rendering came to rest.
    AnimationFinished {
        /// Final ring rotation in slot units.
        angle_in_slots: f32,
    },
}

/// Why a message could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostError {
    /// The channel is at capacity; try again later.
    Full,
    /// The host side has gone away.
    Disconnected,
}

impl fmt::Display for PostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "host channel is full"),
            Self::Disconnected => write!(f, "host channel is disconnected"),
        }
    }
}

impl std::error::Error for PostError {}

impl<T> From<TrySendError<T>> for PostError {
    fn from(e: TrySendError<T>) -> Self {
        match e {
            TrySendError::Full(_) => Self::Full,
            TrySendError::Closed(_) => Self::Disconnected,
        }
    }
}

/// Transport from the engine to the host.
pub trait HostPort {
    /// Deliver without waiting. May fail under backpressure.
    fn post(&self, message: HostMessage) -> Result<(), PostError>;

    /// Deliver, waiting for capacity if needed.
    ///
    /// Used for selection and long-press. While the queue is full this parks
    /// the caller until the host reads, so the host must not be waiting on
    /// the engine's thread at the same time.
    fn post_blocking(&self, message: HostMessage) -> Result<(), PostError>;
}

/// [`HostPort`] over a bounded channel.
///
/// A host that drains its [`HostInbox`] on the engine's own thread should do
/// so every tick and size the channel for a frame's worth of requests plus
/// the blocking notifications; otherwise a full queue makes
/// [`HostPort::post_blocking`] wait forever. Hosts with their own event
/// thread can drain from there instead.
#[derive(Debug, Clone)]
pub struct ChannelPort {
    tx: Sender<HostMessage>,
}

impl ChannelPort {
    /// Port writing into `tx`.
    #[must_use]
    pub fn new(tx: Sender<HostMessage>) -> Self {
        Self { tx }
    }

    /// Messages waiting to be read by the host.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tx.len()
    }
}

impl HostPort for ChannelPort {
    fn post(&self, message: HostMessage) -> Result<(), PostError> {
        self.tx.try_send(message).map_err(PostError::from)
    }

    fn post_blocking(&self, message: HostMessage) -> Result<(), PostError> {
        self.tx
            .send_blocking(message)
            .map_err(|_| PostError::Disconnected)
    }
}

/// Host-side end of a [`ChannelPort`].
#[derive(Debug, Clone)]
pub struct HostInbox {
    rx: Receiver<HostMessage>,
}

impl HostInbox {
    /// Next message if one is queued.
    #[must_use]
    pub fn try_next(&self) -> Option<HostMessage> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty | TryRecvError::Closed) => None,
        }
    }

    /// Drain every queued message.
    #[must_use]
    pub fn drain(&self) -> Vec<HostMessage> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

/// Bounded engine→host channel holding at most `capacity` messages.
#[must_use]
pub fn channel_port(capacity: usize) -> (ChannelPort, HostInbox) {
    let (tx, rx) = async_channel::bounded(capacity.max(1));
    (ChannelPort::new(tx), HostInbox { rx })
}
