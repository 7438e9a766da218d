//! Terminal escape sequences, color palette and terminal-mode handling

use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Terminal types that get no escape sequences at all
const PLAIN_TERMS: [&str; 3] = ["dumb", "minix", "cons25"];

/// Default SGR foreground digits for the eight palette slots
const DEFAULT_SLOTS: [u8; 8] = [4, 7, 1, 2, 3, 5, 6, 0];

/// Abstract terminal directive
///
/// Cursor moves carry a magnitude; color directives carry an SGR digit
/// (0-9, mapped to foreground 30-39 or background 40-49).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seq {
    Up(usize),
    Down(usize),
    Right(usize),
    Left(usize),
    Bold,
    Fg(u8),
    Bg(u8),
    Reset,
    WrapOn,
    WrapOff,
}

/// Translates directives into terminal byte sequences
///
/// Substitutes the empty string for anything the terminal does not
/// support: deny-listed terminal types get nothing at all, and color
/// directives additionally honor the color-enable flag.
pub struct Emitter {
    sequences: bool,
    colors: bool,
}

impl Emitter {
    pub fn for_terminal(term: &str, color_pref: Option<bool>, is_tty: bool) -> Self {
        let sequences = !PLAIN_TERMS.contains(&term);
        let colors = sequences && color_pref.unwrap_or(is_tty);
        Emitter { sequences, colors }
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Compute mode: the byte sequence for a directive, or an empty
    /// string when the directive is inapplicable on this terminal.
    ///
    /// A cursor move of magnitude 0 also yields the empty string: CSI
    /// treats a 0 parameter as 1, so emitting it would move the cursor.
    pub fn sequence(&self, seq: Seq) -> String {
        if !self.sequences {
            return String::new();
        }
        match seq {
            Seq::Up(0) | Seq::Down(0) | Seq::Right(0) | Seq::Left(0) => String::new(),
            Seq::Up(n) => format!("\x1b[{}A", n),
            Seq::Down(n) => format!("\x1b[{}B", n),
            Seq::Right(n) => format!("\x1b[{}C", n),
            Seq::Left(n) => format!("\x1b[{}D", n),
            Seq::Bold | Seq::Fg(_) | Seq::Bg(_) | Seq::Reset if !self.colors => String::new(),
            Seq::Bold => "\x1b[1m".to_string(),
            Seq::Fg(n) => {
                assert!(n <= 9, "foreground color digit {} out of range", n);
                format!("\x1b[3{}m", n)
            }
            Seq::Bg(n) => {
                assert!(n <= 9, "background color digit {} out of range", n);
                format!("\x1b[4{}m", n)
            }
            Seq::Reset => "\x1b[0m".to_string(),
            Seq::WrapOn => "\x1b[?7h".to_string(),
            Seq::WrapOff => "\x1b[?7l".to_string(),
        }
    }

    /// Print mode: write the sequence directly to the output stream
    pub fn print<W: Write>(&self, out: &mut W, seq: Seq) -> io::Result<()> {
        out.write_all(self.sequence(seq).as_bytes())
    }
}

/// Eight color slots resolved once at startup
pub struct Palette {
    slots: [String; 8],
    bold: String,
    reset: String,
}

impl Palette {
    pub fn resolve(emitter: &Emitter, overrides: &[Option<u8>; 8]) -> Self {
        let mut slots: [String; 8] = Default::default();
        for (i, slot) in slots.iter_mut().enumerate() {
            let digit = overrides[i].unwrap_or(DEFAULT_SLOTS[i]);
            *slot = emitter.sequence(Seq::Fg(digit));
        }
        Palette {
            slots,
            bold: emitter.sequence(Seq::Bold),
            reset: emitter.sequence(Seq::Reset),
        }
    }

    /// Escape sequence for a 1-based palette slot
    pub fn slot(&self, n: usize) -> &str {
        assert!((1..=8).contains(&n), "palette slot {} out of range", n);
        &self.slots[n - 1]
    }

    pub fn bold(&self) -> &str {
        &self.bold
    }

    pub fn reset(&self) -> &str {
        &self.reset
    }
}

/// Keeps line wrapping disabled for its lifetime
///
/// The restore sequence runs on drop so the terminal is left usable no
/// matter how the run ends.
pub struct WrapGuard {
    restore: String,
}

impl WrapGuard {
    pub fn engage(emitter: &Emitter) -> Self {
        let mut out = io::stdout();
        let _ = out.write_all(emitter.sequence(Seq::WrapOff).as_bytes());
        let _ = out.flush();
        WrapGuard {
            restore: emitter.sequence(Seq::WrapOn),
        }
    }
}

impl Drop for WrapGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out.write_all(self.restore.as_bytes());
        let _ = out.flush();
    }
}

/// Remove escape sequences so layout math sees only printable text
pub fn strip_sequences(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // parameter and intermediate bytes end at the first letter
            for t in chars.by_ref() {
                if t.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            chars.next();
        }
    }
    out
}

/// Display width of a string, escape sequences excluded
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_sequences(s).as_str())
}

/// True when the file descriptor refers to a terminal
pub fn isatty(fd: i32) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}
