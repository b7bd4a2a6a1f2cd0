//! Value types and the conversion relations between them.
//!
//! Quill has three numeric types plus function signatures:
//!
//! | Type     | Width | WAT  |
//! |----------|-------|------|
//! | `char`   | 22    | i32  |
//! | `int`    | 32    | i32  |
//! | `double` | 64    | f64  |
//!
//! Widths only drive "widest wins" promotion; `char` and `int` share the same
//! 32-bit cell at the output layer.

use std::fmt;

/// A Quill value type.
///
/// Equality is structural: two function types are equal iff their parameter
/// lists are equal element-wise and their return types are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Type {
    /// The type of statements that leave no value.
    #[default]
    Void,
    Char,
    Int,
    Double,
    Function { params: Vec<Type>, ret: Box<Type> },
}

impl Type {
    /// Build a function signature.
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    /// Resolve a numeric type keyword.
    ///
    /// Returns `None` for anything that is not `char`, `int` or `double`.
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "char" => Some(Type::Char),
            "int" => Some(Type::Int),
            "double" => Some(Type::Double),
            _ => None,
        }
    }

    #[inline]
    pub fn is_char(&self) -> bool {
        matches!(self, Type::Char)
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    #[inline]
    pub fn is_double(&self) -> bool {
        matches!(self, Type::Double)
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Char | Type::Int | Type::Double)
    }

    /// Width used to pick the wider side of a mixed numeric operation.
    pub fn bit_width(&self) -> u32 {
        match self {
            Type::Char => 22,
            Type::Int => 32,
            Type::Double => 64,
            Type::Void | Type::Function { .. } => 0,
        }
    }

    /// Return type of a function signature, `None` for value types.
    pub fn return_type(&self) -> Option<&Type> {
        match self {
            Type::Function { ret, .. } => Some(ret),
            _ => None,
        }
    }

    /// Implicit conversion: `char -> int -> double`, never narrowing.
    ///
    /// Function types convert only to an identical signature.
    pub fn convertible_to(&self, target: &Type) -> bool {
        match self {
            Type::Void => target == &Type::Void,
            Type::Char => target.is_numeric(),
            Type::Int => matches!(target, Type::Int | Type::Double),
            Type::Double => target.is_double(),
            Type::Function { .. } => self == target,
        }
    }

    /// Explicit conversion: any numeric to any numeric. Never legal for
    /// functions or void.
    pub fn castable_to(&self, target: &Type) -> bool {
        self.is_numeric() && target.is_numeric()
    }

    /// The result type of `self op other` for arithmetic operators.
    ///
    /// The strictly wider side wins; on a tie the right operand's type is used.
    pub fn wider<'a>(&'a self, other: &'a Type) -> &'a Type {
        if self.bit_width() > other.bit_width() {
            self
        } else {
            other
        }
    }

    /// WAT value type, `None` for types with no stack representation.
    pub fn wat(&self) -> Option<&'static str> {
        match self {
            Type::Char | Type::Int => Some("i32"),
            Type::Double => Some("f64"),
            Type::Void | Type::Function { .. } => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Char => f.write_str("char"),
            Type::Int => f.write_str("int"),
            Type::Double => f.write_str("double"),
            Type::Function { params, ret } => {
                write!(f, "{ret}(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
        }
    }
}
