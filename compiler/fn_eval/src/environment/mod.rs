//! Environments and the arena that owns them.
//!
//! An environment is a name to value map plus an optional parent value.
//! Environments live in a [`Heap`] owned by the interpreter and are
//! referred to by [`EnvId`]. Closures capture scopes and scopes contain
//! closures, so shared ownership would leak cycles. The arena instead frees
//! unreachable environments when [`Heap::collect`] is run with the live
//! roots, and everything when the interpreter is dropped.
//!
//! The root environment at [`EnvId::ROOT`] holds the builtins.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::builtins;
use crate::errors::{duplicate_definition, not_callable, EvalError, EvalResult};
use crate::value::{Capabilities, Definitions, NativeBody, Value};
use crate::Interpreter;

/// Handle to an environment in a [`Heap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvId(u32);

impl EnvId {
    /// The builtins environment.
    pub const ROOT: EnvId = EnvId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "env#{}", self.0)
    }
}

/// A single scope.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
    parent: Option<Value>,
}

impl Environment {
    pub fn new(parent: Option<Value>) -> Self {
        Environment {
            bindings: FxHashMap::default(),
            parent,
        }
    }

    pub fn parent(&self) -> Option<&Value> {
        self.parent.as_ref()
    }

    /// Own binding, ignoring the parent chain.
    pub fn own(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Own bindings ordered by name.
    pub fn sorted_bindings(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Arena of environments.
///
/// Nothing is freed implicitly. [`Heap::collect`] sweeps environments that
/// are unreachable from the given roots and recycles their slots; between
/// collections every block, branch and call keeps its environment.
pub struct Heap {
    envs: Vec<Environment>,
    free: Vec<EnvId>,
}

impl Heap {
    /// A heap holding only the builtins root.
    pub fn new() -> Self {
        let mut root = Environment::new(None);
        for (name, value) in builtins::root_bindings() {
            root.bindings.insert(name.to_string(), value);
        }
        Heap {
            envs: vec![root],
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> Value {
        Value::Environment(EnvId::ROOT)
    }

    /// Allocate an empty environment, reusing a swept slot when one exists.
    pub fn alloc(&mut self, parent: Option<Value>) -> EnvId {
        if let Some(id) = self.free.pop() {
            self.envs[id.index()] = Environment::new(parent);
            return id;
        }
        let id = slot_id(self.envs.len());
        self.envs.push(Environment::new(parent));
        id
    }

    /// Allocate an empty child of `parent`.
    pub fn child_of(&mut self, parent: &Value) -> Value {
        Value::Environment(self.alloc(Some(parent.clone())))
    }

    /// Number of live environments, root included.
    pub fn len(&self) -> usize {
        self.envs.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Free every environment unreachable from the root and `roots`.
    ///
    /// Returns how many environments were freed by this call. Any value
    /// not reachable from `roots` may refer to a recycled slot afterwards.
    pub fn collect(&mut self, roots: &[Value]) -> usize {
        let marked = self.mark(roots);
        let before = self.free.len();
        self.free.clear();
        for (idx, live) in marked.into_iter().enumerate() {
            if !live {
                self.envs[idx] = Environment::default();
                self.free.push(slot_id(idx));
            }
        }
        self.free.len() - before
    }

    fn mark(&self, roots: &[Value]) -> Vec<bool> {
        let mut marked = vec![false; self.envs.len()];
        let root = self.root();
        let mut pending: Vec<&Value> = roots.iter().collect();
        pending.push(&root);

        while let Some(value) = pending.pop() {
            match value {
                Value::Environment(id) => {
                    if marked[id.index()] {
                        continue;
                    }
                    marked[id.index()] = true;
                    let env = self.get(*id);
                    pending.extend(env.parent.iter());
                    pending.extend(env.bindings.values());
                }
                Value::Closure(closure) => pending.push(&closure.captured),
                Value::List(list) => pending.extend(list.items.iter()),
                Value::NativeFunction(native) => {
                    if let NativeBody::Bound { receiver, .. } = &native.body {
                        pending.push(receiver.as_ref());
                    }
                }
                Value::Void | Value::Number(_) | Value::Str(_) | Value::Bool(_) => {}
            }
        }
        marked
    }

    /// Ids are only minted by this heap, so indexing cannot miss.
    pub fn get(&self, id: EnvId) -> &Environment {
        &self.envs[id.index()]
    }

    /// Bind `name` in `id`'s own bindings. Shadowing an ancestor is fine.
    pub fn define(&mut self, id: EnvId, name: &str, value: Value) -> Result<(), EvalError> {
        let env = &mut self.envs[id.index()];
        if env.bindings.contains_key(name) {
            return Err(duplicate_definition(name));
        }
        trace!(%id, name, "define");
        env.bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Bind every entry of `entries` in `id`, or none of them.
    ///
    /// Entries are checked against existing own bindings first; the first
    /// collision in name order is reported.
    pub fn define_all(
        &mut self,
        id: EnvId,
        entries: Vec<(String, Value)>,
    ) -> Result<(), EvalError> {
        let env = &mut self.envs[id.index()];
        let mut entries = entries;
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        if let Some((name, _)) = entries.iter().find(|(name, _)| env.bindings.contains_key(name)) {
            return Err(duplicate_definition(name));
        }
        env.bindings.extend(entries);
        Ok(())
    }

    /// Resolve `name` through own bindings, then the parent chain.
    pub fn lookup(&self, id: EnvId, name: &str) -> Option<Value> {
        let mut current = id;
        loop {
            let env = self.get(current);
            if let Some(value) = env.bindings.get(name) {
                return Some(value.clone());
            }
            match &env.parent {
                Some(Value::Environment(parent)) => current = *parent,
                Some(other) => return other.lookup(self, name),
                None => return None,
            }
        }
    }

    /// Own bindings merged over everything visible through the parent.
    pub fn definitions(&self, id: EnvId) -> Definitions {
        let env = self.get(id);
        let mut defs = env
            .parent
            .as_ref()
            .map(|parent| parent.definitions(self))
            .unwrap_or_default();
        for (name, value) in &env.bindings {
            defs.insert(name.clone(), value.clone());
        }
        defs
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "more than u32::MAX environments exhausts memory first"
)]
fn slot_id(idx: usize) -> EnvId {
    EnvId(idx as u32)
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap").field("envs", &self.envs.len()).finish()
    }
}

impl Capabilities for EnvId {
    fn type_name(&self) -> &'static str {
        "environment"
    }

    fn definitions(&self, heap: &Heap) -> Definitions {
        heap.definitions(*self)
    }

    fn lookup(&self, heap: &Heap, name: &str) -> Option<Value> {
        heap.lookup(*self, name)
    }

    fn define(&self, heap: &mut Heap, name: &str, value: Value) -> EvalResult {
        heap.define(*self, name, value)?;
        Ok(Value::Environment(*self))
    }

    fn display(&self, heap: &Heap) -> String {
        Value::Environment(*self).display(heap)
    }

    /// Calls the environment's own `call` binding.
    fn call(&self, interp: &mut Interpreter, args: &[Value]) -> EvalResult {
        let Some(callee) = interp.heap().get(*self).own("call").cloned() else {
            return Err(not_callable(self.type_name()));
        };
        callee.call(interp, args)
    }
}
