//! The lexer's mode stack.
//!
//! Each frame pairs a tokenization ruleset with private nesting counters. The
//! top frame lives outside the vector so the stack can never be empty.

use crate::error::ImbalancedStackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Ordinary host-language code.
    Host,
    /// Inside an open tag: tag name and attributes.
    Tag,
    /// Inside a tag body: text runs, interpolations and nested tags.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub mode: Mode,
    pub braces: u32,
    pub parens: u32,
}

impl Frame {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            braces: 0,
            parens: 0,
        }
    }

    /// A frame is closed once every delimiter it opened has been matched.
    pub fn is_balanced(&self) -> bool {
        self.braces == 0 && self.parens == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack {
    top: Frame,
    below: Vec<Frame>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self {
            top: Frame::new(Mode::Host),
            below: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.top.mode
    }

    pub fn depth(&self) -> usize {
        self.below.len() + 1
    }

    pub fn top(&self) -> &Frame {
        &self.top
    }

    pub fn top_mut(&mut self) -> &mut Frame {
        &mut self.top
    }

    pub fn push(&mut self, mode: Mode) {
        let prev = std::mem::replace(&mut self.top, Frame::new(mode));
        self.below.push(prev);
    }

    /// Discards the top frame and returns its mode.
    pub fn pop(&mut self) -> Result<Mode, ImbalancedStackError> {
        let next = self.below.pop().ok_or(ImbalancedStackError)?;
        let popped = std::mem::replace(&mut self.top, next);
        Ok(popped.mode)
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_single_host_frame() {
        let stack = ModeStack::new();
        assert_eq!(stack.mode(), Mode::Host);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn pop_of_bottom_frame_fails() {
        let mut stack = ModeStack::new();
        assert_eq!(stack.pop(), Err(ImbalancedStackError));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn counters_are_private_per_frame() {
        let mut stack = ModeStack::new();
        stack.top_mut().braces = 3;
        stack.push(Mode::Tag);
        assert_eq!(stack.top().braces, 0);
        stack.push(Mode::Host);
        stack.top_mut().parens = 1;
        assert_eq!(stack.pop(), Ok(Mode::Host));
        assert_eq!(stack.pop(), Ok(Mode::Tag));
        assert_eq!(stack.top().braces, 3);
    }
}
