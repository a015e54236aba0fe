//! Operation registry: the fixed table of calculator keys.
//!
//! Every operation carries its numeric function and, separately, the rule
//! used to render it into the running description.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::random::RandomSource;

#[derive(Clone, Copy)]
pub enum Operation {
    Constant(f64),
    Niladic {
        compute: fn(&dyn RandomSource) -> f64,
        label: &'static str,
    },
    Unary {
        compute: fn(f64) -> f64,
        describe: fn(&str) -> String,
    },
    Binary {
        compute: fn(f64, f64) -> f64,
        describe: fn(&str, &str) -> String,
    },
    Equals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Constant,
    Niladic,
    Unary,
    Binary,
    Equals,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Constant => write!(f, "constant"),
            OperationKind::Niladic => write!(f, "niladic"),
            OperationKind::Unary => write!(f, "unary"),
            OperationKind::Binary => write!(f, "binary"),
            OperationKind::Equals => write!(f, "equals"),
        }
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Constant(_) => OperationKind::Constant,
            Operation::Niladic { .. } => OperationKind::Niladic,
            Operation::Unary { .. } => OperationKind::Unary,
            Operation::Binary { .. } => OperationKind::Binary,
            Operation::Equals => OperationKind::Equals,
        }
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Operation::Niladic { label, .. } => {
                f.debug_struct("Niladic").field("label", label).finish()
            }
            Operation::Unary { .. } => write!(f, "Unary"),
            Operation::Binary { .. } => write!(f, "Binary"),
            Operation::Equals => write!(f, "Equals"),
        }
    }
}

static OPERATIONS: Lazy<HashMap<&'static str, Operation>> = Lazy::new(|| {
    HashMap::from([
        ("π", Operation::Constant(std::f64::consts::PI)),
        ("e", Operation::Constant(std::f64::consts::E)),
        (
            "Rand",
            Operation::Niladic {
                compute: |source| source.next_f64(),
                label: "Rand()",
            },
        ),
        ("√", unary(f64::sqrt, |x| format!("√({})", x))),
        ("%", unary(|x| x / 100.0, |x| format!("({}/100)", x))),
        ("cos", unary(f64::cos, |x| format!("cos({})", x))),
        ("sin", unary(f64::sin, |x| format!("sin({})", x))),
        ("tan", unary(f64::tan, |x| format!("tan({})", x))),
        ("sinh", unary(f64::sinh, |x| format!("sinh({})", x))),
        ("cosh", unary(f64::cosh, |x| format!("cosh({})", x))),
        ("tanh", unary(f64::tanh, |x| format!("tanh({})", x))),
        ("±", unary(|x| -x, |x| format!("-({})", x))),
        ("x!", unary(factorial, |x| format!("({})!", x))),
        ("^", binary(f64::powf, |a, b| format!("{}^{}", a, b))),
        ("×", binary(|a, b| a * b, |a, b| format!("{}×{}", a, b))),
        ("÷", binary(|a, b| a / b, |a, b| format!("{}÷{}", a, b))),
        ("-", binary(|a, b| a - b, |a, b| format!("{}-{}", a, b))),
        ("+", binary(|a, b| a + b, |a, b| format!("{}+{}", a, b))),
        ("=", Operation::Equals),
    ])
});

fn unary(compute: fn(f64) -> f64, describe: fn(&str) -> String) -> Operation {
    Operation::Unary { compute, describe }
}

fn binary(compute: fn(f64, f64) -> f64, describe: fn(&str, &str) -> String) -> Operation {
    Operation::Binary { compute, describe }
}

/// Look up the operation bound to a key symbol
pub fn lookup(symbol: &str) -> Option<Operation> {
    OPERATIONS.get(symbol).copied()
}

/// All registered symbols, sorted
pub fn symbols() -> Vec<&'static str> {
    let mut symbols: Vec<&'static str> = OPERATIONS.keys().copied().collect();
    symbols.sort_unstable();
    symbols
}

/// Factorial for integral inputs; any fractional input yields 0.
///
/// Multiplies in the same order as `n * factorial(n - 1)` and stops once the
/// product overflows to infinity.
pub fn factorial(n: f64) -> f64 {
    if n.trunc() != n {
        return 0.0;
    }
    let mut product: f64 = 1.0;
    let mut k = 2.0;
    while k <= n && product.is_finite() {
        product *= k;
        k += 1.0;
    }
    product
}
