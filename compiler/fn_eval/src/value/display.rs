//! Text rendering of values, as used by `print` and `asString`.

use std::fmt::Write as _;

use super::{Capabilities, Value};
use crate::environment::{EnvId, Heap};

pub(super) fn render(value: &Value, heap: &Heap) -> String {
    let mut out = String::new();
    Renderer {
        heap,
        visiting: Vec::new(),
    }
    .write(value, &mut out);
    out
}

/// Tracks environments being rendered so a scope that contains itself
/// renders as `{ ... }` instead of recursing forever.
struct Renderer<'h> {
    heap: &'h Heap,
    visiting: Vec<EnvId>,
}

impl Renderer<'_> {
    fn write(&mut self, value: &Value, out: &mut String) {
        match value {
            Value::Void => out.push_str("void"),
            Value::Number(n) => out.push_str(n.text()),
            Value::Str(s) => out.push_str(s),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::List(list) => {
                out.push_str("List(");
                for (idx, item) in list.items.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    self.write(item, out);
                }
                out.push(')');
            }
            Value::NativeFunction(func) => {
                let _ = write!(out, "{func}");
            }
            Value::Closure(closure) => out.push_str(&closure.display(self.heap)),
            Value::Environment(id) => self.write_env(*id, out),
        }
    }

    fn write_env(&mut self, id: EnvId, out: &mut String) {
        if self.visiting.contains(&id) {
            out.push_str("{ ... }");
            return;
        }
        let env = self.heap.get(id);
        if let Some(value) = env.own("value") {
            self.visiting.push(id);
            self.write(value, out);
            self.visiting.pop();
            return;
        }

        self.visiting.push(id);
        out.push_str("{\n");
        for (name, value) in env.sorted_bindings() {
            let _ = write!(out, "  {name}: ");
            self.write(value, out);
            out.push('\n');
        }
        out.push('}');
        self.visiting.pop();
    }
}
