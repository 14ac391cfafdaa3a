use crate::runtime::error::{self, ErrorKind, script_error};
use std::fmt::{self, Display, Formatter};

/// Names the four stacks of the interpreter so that overflow and underflow errors can say which
/// one failed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StackKind {
    Data,
    Return,
    Loop,
    Aux,
}

impl Display for StackKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StackKind::Data => write!(f, "Data"),
            StackKind::Return => write!(f, "Return"),
            StackKind::Loop => write!(f, "Loop"),
            StackKind::Aux => write!(f, "Aux"),
        }
    }
}

/// A LIFO stack that grows on demand up to a fixed capacity.  Pushing past the capacity or popping
/// an empty stack is reported as an error instead of touching memory it doesn't own.
#[derive(Clone)]
pub struct BoundedStack<T> {
    kind: StackKind,
    capacity: usize,
    max_depth: usize,
    items: Vec<T>,
}

impl<T> BoundedStack<T> {
    pub fn new(kind: StackKind, capacity: usize) -> BoundedStack<T> {
        BoundedStack {
            kind,
            capacity,
            max_depth: 0,
            items: Vec::new(),
        }
    }

    /// The deepest the stack has been since it was created or last reset.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn push(&mut self, item: T) -> error::Result<()> {
        if self.items.len() >= self.capacity {
            return script_error(ErrorKind::StackOverflow {
                stack: self.kind,
                capacity: self.capacity,
            });
        }

        self.items.push(item);
        self.max_depth = self.max_depth.max(self.items.len());

        Ok(())
    }

    pub fn pop(&mut self) -> error::Result<T> {
        match self.items.pop() {
            Some(item) => Ok(item),
            None => script_error(ErrorKind::StackUnderflow(self.kind)),
        }
    }

    /// Look at an item without removing it, 0 being the top.
    pub fn peek(&self, depth: usize) -> error::Result<&T> {
        if depth >= self.items.len() {
            return script_error(ErrorKind::StackUnderflow(self.kind));
        }

        Ok(&self.items[self.items.len() - 1 - depth])
    }

    pub fn top(&self) -> error::Result<&T> {
        self.peek(0)
    }

    pub fn top_mut(&mut self) -> error::Result<&mut T> {
        match self.items.last_mut() {
            Some(item) => Ok(item),
            None => script_error(ErrorKind::StackUnderflow(self.kind)),
        }
    }

    /// Make sure at least `count` items are present before an operation starts taking them apart.
    pub fn require(&self, count: usize) -> error::Result<()> {
        if self.items.len() < count {
            return script_error(ErrorKind::StackUnderflow(self.kind));
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.max_depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_past_capacity_is_an_overflow() {
        let mut stack = BoundedStack::new(StackKind::Aux, 2);

        stack.push(1).unwrap();
        stack.push(2).unwrap();

        let error = stack.push(3).unwrap_err();
        assert_eq!(
            *error.kind(),
            ErrorKind::StackOverflow { stack: StackKind::Aux, capacity: 2 }
        );
        assert_eq!(stack.as_slice(), &[1, 2]);
    }

    #[test]
    fn pop_and_peek_on_empty_are_underflows() {
        let mut stack = BoundedStack::<i32>::new(StackKind::Loop, 4);

        assert_eq!(*stack.pop().unwrap_err().kind(), ErrorKind::StackUnderflow(StackKind::Loop));
        assert_eq!(*stack.top().unwrap_err().kind(), ErrorKind::StackUnderflow(StackKind::Loop));
        assert_eq!(
            *stack.require(1).unwrap_err().kind(),
            ErrorKind::StackUnderflow(StackKind::Loop)
        );
    }

    #[test]
    fn peek_counts_from_the_top() {
        let mut stack = BoundedStack::new(StackKind::Data, 8);

        for value in 1..=3 {
            stack.push(value).unwrap();
        }

        assert_eq!(*stack.peek(0).unwrap(), 3);
        assert_eq!(*stack.peek(2).unwrap(), 1);
        assert!(stack.peek(3).is_err());
        assert_eq!(stack.max_depth(), 3);
    }
}
