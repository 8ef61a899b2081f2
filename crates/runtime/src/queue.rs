//! First-in, first-out buffer of pending commands.
use std::collections::VecDeque;

use chegg_core::Command;

/// Commands waiting for the session to execute them, oldest first.
///
/// Callers on any side of the table push here; the session drains one
/// command at a time so the engine never sees two commands interleaved.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn peek(&self) -> Option<&Command> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending command and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use chegg_core::{InstanceId, Position};

    use super::*;

    #[test]
    fn commands_leave_in_arrival_order() {
        let mut queue = CommandQueue::new();
        queue.push(Command::EndTurn);
        queue.extend([Command::Move {
            unit: InstanceId(1),
            to: Position::new(2, 2),
        }]);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek(), Some(&Command::EndTurn));
        assert_eq!(queue.pop(), Some(Command::EndTurn));
        assert!(matches!(queue.pop(), Some(Command::Move { .. })));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.clear(), 0);
    }
}
