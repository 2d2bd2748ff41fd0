//! `import` and `import!`.
//!
//! A source unit is loaded, parsed and evaluated in a fresh child of the
//! root. `import` returns the unit's environment; `import!` also copies
//! the unit's own bindings into the current scope. Imports are not cached,
//! so importing twice runs the unit twice.

use fn_ir::{line_col, FunctionCall};
use tracing::debug;

use super::{EvalOutcome, Evaluated, Interpreter};
use crate::environment::EnvId;
use crate::errors::{argument_count_mismatch, import_failure, not_definable, type_mismatch, EvalError};
use crate::value::{Capabilities, Value};

impl Interpreter {
    pub(super) fn eval_import(
        &mut self,
        call: &FunctionCall,
        scope: &Value,
        merge: bool,
    ) -> EvalOutcome {
        let operator = call.operator.name.as_str();
        let [path] = call.args.as_slice() else {
            return Err(argument_count_mismatch(operator, 1, call.args.len()));
        };
        let path = match self.eval(path, scope)?.value {
            Value::Str(path) => path,
            other => return Err(type_mismatch("string path", other.type_name())),
        };

        let unit = self.load_unit(&path)?;
        if merge {
            self.merge_unit(unit, scope)?;
        }
        Ok(Evaluated::new(Value::Environment(unit), scope))
    }

    /// Copy `unit`'s own bindings into `scope`, all or nothing.
    fn merge_unit(&mut self, unit: EnvId, scope: &Value) -> Result<(), EvalError> {
        let Some(target) = scope.as_env() else {
            return Err(not_definable(scope.type_name()));
        };
        let entries = self
            .heap
            .get(unit)
            .sorted_bindings()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        self.heap.define_all(target, entries)
    }

    /// Load, parse and evaluate a unit, returning its environment.
    pub fn load_unit(&mut self, path: &str) -> Result<EnvId, EvalError> {
        debug!(path, "import");
        let source = self
            .loader
            .load(path)
            .map_err(|err| import_failure(path, err.reason))?;
        let program = fn_parse::parse_source(&source).map_err(|err| {
            let (line, col) = line_col(&source, err.span.start);
            import_failure(path, format!("{line}:{col}: {err}"))
        })?;

        let mut frame = self.enter_call()?;
        let root = frame.heap.root();
        let unit = frame.heap.alloc(Some(root));
        frame.eval_sequence(&program, &Value::Environment(unit))?;
        Ok(unit)
    }
}
