//! Binary and Unary Operators
//!
//! All operator types used in expressions, with the precedence table the
//! expression parser climbs.

/// Associativity of a binary operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Assoc {
    Left,
    Right,
    /// Chaining at the same level is a syntax error (`a < b < c`).
    NonAssoc,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Mul,
    Div,
    Rem,
    Add,
    Sub,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,

    // Logical
    And,
    Or,

    Assign,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Assign => "=",
        }
    }

    /// Returns the precedence level of this operator.
    ///
    /// Higher number = lower precedence (binds less tightly). Level 0 is
    /// reserved for unary prefixes and parentheses.
    ///
    /// - 1: `*` `/` `%`
    /// - 2: `+` `-`
    /// - 3: `<` `<=` `>` `>=`
    /// - 4: `==` `!=`
    /// - 5: `&&`
    /// - 6: `||`
    /// - 7: `=`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Rem => 1,
            Self::Add | Self::Sub => 2,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Eq | Self::NotEq => 4,
            Self::And => 5,
            Self::Or => 6,
            Self::Assign => 7,
        }
    }

    pub const fn assoc(self) -> Assoc {
        match self {
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Eq | Self::NotEq => {
                Assoc::NonAssoc
            }
            Self::Assign => Assoc::Right,
            Self::Mul | Self::Div | Self::Rem | Self::Add | Self::Sub | Self::And | Self::Or => {
                Assoc::Left
            }
        }
    }

    /// `* / + -`: result follows the wider operand.
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Mul | Self::Div | Self::Add | Self::Sub)
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Eq | Self::NotEq
        )
    }

    /// Operators whose result is always `int`.
    pub const fn yields_int(self) -> bool {
        self.is_comparison() || matches!(self, Self::Rem | Self::And | Self::Or)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
    /// The `sqrt(...)` builtin.
    Sqrt,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::Sqrt => "sqrt",
        }
    }
}
