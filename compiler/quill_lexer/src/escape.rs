//! Character literal decoding.

/// Decode a quoted character literal (`'a'`, `'\n'`) to its byte value.
///
/// Returns `None` for anything that is not exactly one ASCII character or one
/// supported escape between single quotes.
pub fn char_value(lexeme: &str) -> Option<u8> {
    let inner = lexeme.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let value = match chars.next()? {
        '\\' => match chars.next()? {
            'n' => b'\n',
            't' => b'\t',
            'r' => b'\r',
            '0' => 0,
            '\\' => b'\\',
            '\'' => b'\'',
            _ => return None,
        },
        c if c.is_ascii() => c as u8,
        _ => return None,
    };
    chars.next().is_none().then_some(value)
}
