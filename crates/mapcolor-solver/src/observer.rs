//! Step observers.
//!
//! The engine reports every tentative commit as `(variable, Some(color))` and
//! every undo as `(variable, None)`. Observers only watch: they get shared
//! references and nothing they return reaches the search.

use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};

/// A single commit or undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent<V, C> {
    Set { variable: V, color: C },
    Unset { variable: V },
}

impl<V: Clone, C: Clone> StepEvent<V, C> {
    pub fn new(variable: &V, color: Option<&C>) -> Self {
        match color {
            Some(color) => StepEvent::Set {
                variable: variable.clone(),
                color: color.clone(),
            },
            None => StepEvent::Unset {
                variable: variable.clone(),
            },
        }
    }
}

pub trait StepObserver<V, C> {
    fn on_step(&mut self, variable: &V, color: Option<&C>);
}

impl<V, C, F> StepObserver<V, C> for F
where
    F: FnMut(&V, Option<&C>),
{
    fn on_step(&mut self, variable: &V, color: Option<&C>) {
        self(variable, color)
    }
}

/// Ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<V, C> StepObserver<V, C> for NoopObserver {
    fn on_step(&mut self, _variable: &V, _color: Option<&C>) {}
}

/// Records every step in order.
#[derive(Debug, Clone)]
pub struct StepRecorder<V, C> {
    events: Vec<StepEvent<V, C>>,
}

impl<V, C> StepRecorder<V, C> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[StepEvent<V, C>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<StepEvent<V, C>> {
        self.events
    }
}

impl<V, C> Default for StepRecorder<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: Clone> StepObserver<V, C> for StepRecorder<V, C> {
    fn on_step(&mut self, variable: &V, color: Option<&C>) {
        self.events.push(StepEvent::new(variable, color));
    }
}

/// Forwards steps to another thread (typically a renderer).
///
/// Sending never blocks on an unbounded channel and a disconnected receiver
/// is ignored.
#[derive(Debug, Clone)]
pub struct ChannelObserver<V, C> {
    sender: Sender<StepEvent<V, C>>,
}

impl<V, C> ChannelObserver<V, C> {
    pub fn new(sender: Sender<StepEvent<V, C>>) -> Self {
        Self { sender }
    }

    /// An observer and the receiving end of an unbounded channel.
    pub fn unbounded() -> (Self, Receiver<StepEvent<V, C>>) {
        let (sender, receiver) = channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl<V: Clone, C: Clone> StepObserver<V, C> for ChannelObserver<V, C> {
    fn on_step(&mut self, variable: &V, color: Option<&C>) {
        let _ = self.sender.try_send(StepEvent::new(variable, color));
    }
}

/// Minimum pause after an undo.
const MIN_UNDO_PAUSE: Duration = Duration::from_millis(20);

/// Pauses after each step so an observer can animate the search.
///
/// Commits wait `delay`; undos wait 0.6 × `delay`, at least 20 ms.
/// A zero delay never sleeps.
#[derive(Debug, Clone)]
pub struct Paced<O> {
    inner: O,
    delay: Duration,
}

impl<O> Paced<O> {
    pub fn new(inner: O, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }

    /// Pause applied after a commit (`true`) or an undo (`false`).
    pub fn pause(&self, commit: bool) -> Duration {
        if self.delay.is_zero() {
            Duration::ZERO
        } else if commit {
            self.delay
        } else {
            (self.delay * 3 / 5).max(MIN_UNDO_PAUSE)
        }
    }
}

impl<V, C, O: StepObserver<V, C>> StepObserver<V, C> for Paced<O> {
    fn on_step(&mut self, variable: &V, color: Option<&C>) {
        self.inner.on_step(variable, color);
        let pause = self.pause(color.is_some());
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }
}
