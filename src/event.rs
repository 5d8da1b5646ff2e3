//! # Events
//!
//! Tagged messages and the thread-safe FIFO that carries them to the engine.
//!
//! Any number of producers may hold an [`EventSender`]; only the engine's own
//! thread drains the queue.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{
    any::Any,
    fmt,
    sync::mpsc::{self, Receiver, RecvError, Sender, TryRecvError},
};

/// Tag identifying what a message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    /// Result of a raw input read.
    Input,
    /// Failure reported from a screen callback or event handler.
    Exception,
    /// Application-defined message code.
    User(u32),
}

/// Failure caught at a callback boundary, with where it happened.
#[derive(Debug)]
pub struct ExceptionReport {
    pub context: String,
    pub error: anyhow::Error,
}

impl fmt::Display for ExceptionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.context, self.error)
    }
}

/// Message body.
pub enum Payload {
    Empty,
    Input(String),
    Exception(ExceptionReport),
    Data(Box<dyn Any + Send>),
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Input(value) => f.debug_tuple("Input").field(value).finish(),
            Self::Exception(report) => f.debug_tuple("Exception").field(report).finish(),
            Self::Data(_) => f.write_str("Data(..)"),
        }
    }
}

/// A `(tag, payload)` message.
#[derive(Debug)]
pub struct Event {
    pub tag: EventTag,
    pub payload: Payload,
}

impl Event {
    pub const fn new(tag: EventTag, payload: Payload) -> Self {
        Self { tag, payload }
    }

    /// Input read by the background worker.
    pub fn input(value: impl Into<String>) -> Self {
        Self::new(EventTag::Input, Payload::Input(value.into()))
    }

    /// Failure report.
    pub fn exception(context: impl Into<String>, error: anyhow::Error) -> Self {
        Self::new(
            EventTag::Exception,
            Payload::Exception(ExceptionReport {
                context: context.into(),
                error,
            }),
        )
    }

    /// Application message with an arbitrary payload.
    pub fn user<T: Any + Send>(code: u32, data: T) -> Self {
        Self::new(EventTag::User(code), Payload::Data(Box::new(data)))
    }

    /// Application message without payload.
    pub const fn signal(code: u32) -> Self {
        Self::new(EventTag::User(code), Payload::Empty)
    }

    /// Returns the input string if this is an input message.
    pub fn input_value(&self) -> Option<&str> {
        match &self.payload {
            Payload::Input(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the exception report if this is a failure message.
    pub const fn exception_report(&self) -> Option<&ExceptionReport> {
        match &self.payload {
            Payload::Exception(report) => Some(report),
            _ => None,
        }
    }

    /// Downcasts an application payload.
    pub fn data<T: Any>(&self) -> Option<&T> {
        match &self.payload {
            Payload::Data(data) => data.downcast_ref(),
            _ => None,
        }
    }
}

/// Cloneable producer handle.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<Event>,
}

impl EventSender {
    /// Enqueues a message.
    ///
    /// Returns false if the queue is gone; the message is then dropped.
    pub fn put(&self, event: Event) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::SendError(event)) => {
                tracing::debug!(tag = ?event.tag, "event queue closed, message dropped");
                false
            }
        }
    }
}

/// Unbounded FIFO owned by the engine.
#[derive(Debug)]
pub struct EventQueue {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Returns a handle other threads can post with.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    pub fn put(&self, event: Event) {
        // The queue holds its own receiver, so sending cannot fail.
        let _ = self.tx.send(event);
    }

    /// Dequeues without blocking.
    pub fn try_get(&self) -> Option<Event> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Dequeues, blocking until a message arrives.
    pub fn get(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = EventQueue::new();
        queue.put(Event::user(7, 1_u32));
        queue.put(Event::user(7, 2_u32));

        let first = queue.try_get().unwrap();
        let second = queue.try_get().unwrap();
        assert_eq!(first.data::<u32>(), Some(&1));
        assert_eq!(second.data::<u32>(), Some(&2));
        assert!(queue.try_get().is_none());
    }

    #[test]
    fn test_per_producer_order_across_threads() {
        let queue = EventQueue::new();
        let handles: Vec<_> = (0..3)
            .map(|producer| {
                let sender = queue.sender();
                thread::spawn(move || {
                    for n in 0..50_u32 {
                        sender.put(Event::user(producer, n));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut last = [None::<u32>; 3];
        while let Some(event) = queue.try_get() {
            let EventTag::User(producer) = event.tag else {
                panic!("unexpected tag");
            };
            let n = *event.data::<u32>().unwrap();
            let slot = &mut last[producer as usize];
            assert!(slot.is_none_or(|prev| prev < n));
            *slot = Some(n);
        }
        assert_eq!(last, [Some(49); 3]);
    }

    #[test]
    fn test_payload_accessors() {
        let input = Event::input("yes");
        assert_eq!(input.tag, EventTag::Input);
        assert_eq!(input.input_value(), Some("yes"));
        assert!(input.exception_report().is_none());

        let failure = Event::exception("refresh", anyhow::anyhow!("broken"));
        let report = failure.exception_report().unwrap();
        assert_eq!(report.to_string(), "refresh: broken");

        let signal = Event::signal(3);
        assert_eq!(signal.tag, EventTag::User(3));
        assert!(signal.data::<u32>().is_none());
    }

    #[test]
    fn test_sender_reports_closed_queue() {
        let queue = EventQueue::new();
        let sender = queue.sender();
        assert!(sender.put(Event::signal(1)));
        drop(queue);
        assert!(!sender.put(Event::signal(1)));
    }
}
