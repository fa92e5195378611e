//! Static reader tables, indexed by byte.

/// Reader invoked for a byte that starts a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Macro {
    Vector,
    List,
    Map,
    String,
    Comment,
    Dispatch,
    Unmatched,
    Unsupported,
}

/// Reader invoked for the byte following `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dispatch {
    Set,
    Discard,
    Unsupported,
}

static MACROS: [Option<Macro>; 256] = {
    let mut table = [None; 256];
    table[b'[' as usize] = Some(Macro::Vector);
    table[b']' as usize] = Some(Macro::Unmatched);
    table[b'(' as usize] = Some(Macro::List);
    table[b')' as usize] = Some(Macro::Unmatched);
    table[b'{' as usize] = Some(Macro::Map);
    table[b'}' as usize] = Some(Macro::Unmatched);
    table[b'"' as usize] = Some(Macro::String);
    table[b';' as usize] = Some(Macro::Comment);
    table[b'#' as usize] = Some(Macro::Dispatch);
    // Character literals and metadata.
    table[b'\\' as usize] = Some(Macro::Unsupported);
    table[b'^' as usize] = Some(Macro::Unsupported);
    table
};

static DISPATCH: [Option<Dispatch>; 256] = {
    let mut table = [None; 256];
    table[b'{' as usize] = Some(Dispatch::Set);
    table[b'_' as usize] = Some(Dispatch::Discard);
    table[b'^' as usize] = Some(Dispatch::Unsupported);
    table[b'<' as usize] = Some(Dispatch::Unsupported);
    table
};

#[inline]
pub(crate) fn macro_for(ch: u8) -> Option<Macro> {
    MACROS[ch as usize]
}

#[inline]
pub(crate) fn is_macro(ch: u8) -> bool {
    MACROS[ch as usize].is_some()
}

/// Macro bytes that end a token; `#` may appear inside one.
#[inline]
pub(crate) fn is_terminating_macro(ch: u8) -> bool {
    ch != b'#' && ch != b'\'' && is_macro(ch)
}

#[inline]
pub(crate) fn dispatch_for(ch: u8) -> Option<Dispatch> {
    DISPATCH[ch as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_does_not_terminate_tokens() {
        assert!(is_macro(b'#'));
        assert!(!is_terminating_macro(b'#'));
        assert!(!is_terminating_macro(b'\''));
        for &ch in b"[](){}\";\\^" {
            assert!(is_terminating_macro(ch), "{}", char::from(ch));
        }
    }

    #[test]
    fn dispatch_entries() {
        assert_eq!(dispatch_for(b'{'), Some(Dispatch::Set));
        assert_eq!(dispatch_for(b'_'), Some(Dispatch::Discard));
        assert_eq!(dispatch_for(b'<'), Some(Dispatch::Unsupported));
        assert_eq!(dispatch_for(b'i'), None);
    }
}
