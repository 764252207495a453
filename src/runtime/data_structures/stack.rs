use std::fmt::{self, Display, Formatter};

/// The most values a single stack can hold.
pub const STACK_CAPACITY: usize = 255;

/// The ways a strict stack operation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackError {
    /// A push was attempted on a full stack.
    Overflow,

    /// A pop was attempted on an empty stack.
    Underflow,
}

impl Display for StackError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StackError::Overflow => write!(f, "Stack overflow."),
            StackError::Underflow => write!(f, "Stack underflow."),
        }
    }
}

impl std::error::Error for StackError {}

/// A bounded stack of floating point values.
///
/// The strict operations, `try_push` and `try_pop`, report overflow and underflow.  The forgiving
/// operations used by the calculator words never fail: pushing onto a full stack logs a warning
/// and discards the value, and popping or peeking an empty stack reads as `0.0`.
#[derive(Clone)]
pub struct Stack {
    values: [f64; STACK_CAPACITY],
    count: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    /// Create a new empty stack.
    pub fn new() -> Stack {
        Stack {
            values: [0.0; STACK_CAPACITY],
            count: 0,
        }
    }

    /// How many values are currently on the stack?
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == STACK_CAPACITY
    }

    /// The live values, oldest first.
    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.count]
    }

    /// Push a value, failing if the stack is already full.  A failed push leaves the stack as it
    /// was.
    pub fn try_push(&mut self, value: f64) -> Result<(), StackError> {
        if self.is_full() {
            return Err(StackError::Overflow);
        }

        self.values[self.count] = value;
        self.count += 1;

        Ok(())
    }

    /// Pop the top value, failing if the stack is empty.
    pub fn try_pop(&mut self) -> Result<f64, StackError> {
        if self.is_empty() {
            return Err(StackError::Underflow);
        }

        self.count -= 1;
        Ok(self.values[self.count])
    }

    /// Push a value.  On a full stack the value is discarded and a warning is logged.
    pub fn push(&mut self, value: f64) {
        if let Err(error) = self.try_push(value) {
            tracing::warn!(value, "{} Value discarded.", error);
        }
    }

    /// Pop the top value, or `0.0` if the stack is empty.
    pub fn pop(&mut self) -> f64 {
        self.try_pop().unwrap_or(0.0)
    }

    /// Read the top value without removing it, or `0.0` if the stack is empty.
    pub fn peek(&self) -> f64 {
        match self.count {
            0 => 0.0,
            count => self.values[count - 1],
        }
    }

    /// Forget every value.  The backing storage is left alone, only the count is reset.
    pub fn clear(&mut self) {
        self.count = 0;
    }
}
