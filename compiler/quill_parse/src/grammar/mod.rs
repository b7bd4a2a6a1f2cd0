//! Grammar productions, one module per level.
//!
//! ```text
//! program   := function*
//! function  := "function" IDENT "(" [type IDENT ("," type IDENT)*] ")" ":" type block
//! block     := "{" statement* "}"
//! statement := type IDENT ["=" expr] ";" | if | while | "return" expr ";"
//!            | "break" ";" | "continue" ";" | block | ";" | expr ";"
//! term      := ("+" | "-" | "!") term
//!            | ("(" expr ")" | IDENT | INT | CHAR | FLOAT | "sqrt" "(" expr ")") [":" type]
//! ```

mod expr;
mod item;
mod stmt;
