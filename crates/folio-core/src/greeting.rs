#![forbid(unsafe_code)]

//! Developer-console greeting printed once at boot.

use crate::host::Console;

/// `(text, inline style)` pairs, in print order.
pub const GREETING: [(&str, &str); 3] = [
    (
        "👋 Hey there!",
        "font-size: 20px; font-weight: bold; color: #667eea;",
    ),
    (
        "Thanks for checking out the code!",
        "font-size: 14px; color: #6b7280;",
    ),
    (
        "Feel free to reach out if you have any questions.",
        "font-size: 12px; color: #9ca3af;",
    ),
];

pub fn emit<C: Console + ?Sized>(console: &mut C) {
    for (text, style) in GREETING {
        console.log_styled(text, style);
    }
}
