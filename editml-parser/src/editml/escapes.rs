//! Backslash escape decoding for captured markup content
//!
//!     Escapes are context sensitive. Every context resolves `\\`, `\{` and `\}`.
//!     On top of that, each context resolves exactly one more pair: the operator that
//!     would otherwise close the span.
//!
//!         addition    \+  ->  +
//!         deletion    \-  ->  -
//!         comment     \<  ->  <
//!         highlight   \=  ->  =
//!         block       \~  ->  ~
//!
//!     Decoding is a single left-to-right pass: each backslash pair is consumed once,
//!     so `\\{` yields `\{`, not `{`. Unrecognized pairs (e.g. `\%`) are left as they
//!     are and reported to the caller, which may surface them as warnings. Decoding
//!     never fails.
//!
//!     Only captured content is decoded. Text nodes keep their escapes verbatim.

use crate::editml::ast::InlineKind;

/// Which markup the content was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeContext {
    Inline(InlineKind),
    /// Structural source block content.
    Block,
}

impl EscapeContext {
    /// The context-specific escapable character.
    pub fn operator(self) -> char {
        match self {
            EscapeContext::Inline(kind) => kind.closer(),
            EscapeContext::Block => '~',
        }
    }

    fn resolves(self, ch: char) -> bool {
        matches!(ch, '\\' | '{' | '}') || ch == self.operator()
    }
}

impl From<InlineKind> for EscapeContext {
    fn from(kind: InlineKind) -> Self {
        EscapeContext::Inline(kind)
    }
}

/// Decoded content plus the escape sequences that were left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    pub text: String,
    /// Characters that followed a backslash without forming a known escape.
    pub unknown: Vec<char>,
}

/// Decode `raw` in the given context.
pub fn decode(raw: &str, context: EscapeContext) -> String {
    decode_reporting(raw, context).text
}

/// Decode `raw`, also collecting the unrecognized escape sequences.
pub fn decode_reporting(raw: &str, context: EscapeContext) -> Decoded {
    if !raw.contains('\\') {
        return Decoded {
            text: raw.to_string(),
            unknown: Vec::new(),
        };
    }

    let mut decoded = Decoded {
        text: String::with_capacity(raw.len()),
        unknown: Vec::new(),
    };
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.text.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some(next) if context.resolves(next) => {
                decoded.text.push(next);
                chars.next();
            }
            Some(next) => {
                // Left verbatim; `next` is emitted by the following iteration.
                decoded.text.push('\\');
                decoded.unknown.push(next);
            }
            None => decoded.text.push('\\'),
        }
    }

    decoded
}
