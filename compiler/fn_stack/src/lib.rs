//! Stack safety for deeply nested Fn programs.
//!
//! Both the parser (nested brackets, blocks, infix chains) and the evaluator
//! (nested expressions, recursive closures) recurse on the native stack. Every
//! recursive step goes through [`ensure_sufficient_stack`], which grows the
//! stack on demand instead of letting a deep program crash the process.
//!
//! Growth only protects against native stack exhaustion. The evaluator also
//! enforces its own call depth limit so runaway user recursion is reported as
//! an ordinary runtime error.
//!
//! # Configuration
//!
//! - **Red zone**: 128KB. If less than this remains, the stack is grown.
//! - **Growth size**: 2MB per new segment.

/// Minimum stack space to keep available before recursing further.
const RED_ZONE: usize = 128 * 1024;

/// Stack space allocated for each new segment.
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, expr: &Expr, scope: &Value) -> EvalOutcome {
///     ensure_sufficient_stack(|| self.eval_inner(expr, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_recursion_is_unaffected() {
        fn sum_to(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
        }

        assert_eq!(sum_to(100), 5050);
    }

    #[test]
    fn deep_recursion_grows_the_stack() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        // Far beyond what a default 8MB main-thread stack survives unaided.
        assert_eq!(depth(200_000), 200_000);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
