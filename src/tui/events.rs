//! Where the frontend gets its input from.

use super::crossterm::into_input_event;
use crate::core::event::InputEvent;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

pub trait EventSource {
    /// Wait up to `timeout` for the next event. `Ok(None)` means nothing
    /// arrived in time.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        Ok(into_input_event(crossterm::event::read()?))
    }
}

/// Replays a fixed list of events. Running dry is an `UnexpectedEof` error so
/// a loop waiting for more input terminates.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self, _timeout: Duration) -> io::Result<Option<InputEvent>> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted input exhausted",
            )),
        }
    }
}
