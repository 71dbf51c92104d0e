//! Request and reply queues between network tasks and the engine
//!
//! Network handlers push client messages into a [`RequestChannel`]; the
//! engine drains it once per tick and answers through a [`ReplyChannel`].
//! Both are bounded queues built on `critical-section` and
//! `heapless::Deque`, so they work from interrupts and other executors.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::{Deque, String};

use crate::session::Response;

/// Queued messages per direction
pub const QUEUE_SIZE: usize = 4;

/// Longest client message accepted
pub const MAX_REQUEST_LEN: usize = 96;

pub type RequestText = String<MAX_REQUEST_LEN>;

/// Identifies a connected client
pub type ClientId = u8;

/// Message received from a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub client: ClientId,
    pub text: RequestText,
}

/// Who an outgoing message is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Client(ClientId),
    /// Every connected client
    All,
}

/// Message for the network side to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: Recipient,
    pub text: Response,
}

pub type RequestChannel = Channel<Request, QUEUE_SIZE>;
pub type RequestSender<'a> = Sender<'a, Request, QUEUE_SIZE>;
pub type RequestReceiver<'a> = Receiver<'a, Request, QUEUE_SIZE>;

pub type ReplyChannel = Channel<Outgoing, QUEUE_SIZE>;
pub type ReplySender<'a> = Sender<'a, Outgoing, QUEUE_SIZE>;
pub type ReplyReceiver<'a> = Receiver<'a, Outgoing, QUEUE_SIZE>;

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded queue guarded by a critical section
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Returns `Err(TrySendError(value))` if the channel is full
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Returns `Err(TryReceiveError)` if the channel is empty
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`Channel`]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

// Handles are plain references, copyable whatever `T` is
impl<T, const SIZE: usize> Clone for Sender<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for Sender<'_, T, SIZE> {}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

impl Sender<'_, Request, QUEUE_SIZE> {
    /// Queue a client message, truncating it to [`MAX_REQUEST_LEN`] bytes
    pub fn submit(&self, client: ClientId, text: &str) -> Result<(), TrySendError<Request>> {
        self.try_send(Request {
            client,
            text: crate::state::truncated(text),
        })
    }
}

/// Receiving half of a [`Channel`]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Clone for Receiver<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for Receiver<'_, T, SIZE> {}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }
}
