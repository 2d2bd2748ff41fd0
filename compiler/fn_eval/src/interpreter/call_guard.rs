//! RAII guard for call depth accounting.
//!
//! The guard holds `&mut Interpreter` and derefs to it, so the body of a
//! call runs through the guard and the depth is restored when it drops,
//! whether the body returned normally or with an error.

use std::ops::{Deref, DerefMut};

use super::Interpreter;

pub(super) struct CallGuard<'a> {
    interpreter: &'a mut Interpreter,
}

impl<'a> CallGuard<'a> {
    pub(super) fn new(interpreter: &'a mut Interpreter) -> Self {
        interpreter.call_depth += 1;
        CallGuard { interpreter }
    }
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.interpreter.call_depth -= 1;
    }
}

impl Deref for CallGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Interpreter {
        self.interpreter
    }
}

impl DerefMut for CallGuard<'_> {
    fn deref_mut(&mut self) -> &mut Interpreter {
        self.interpreter
    }
}
