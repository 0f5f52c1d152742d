//! Static language profiles and filename-based selection.

use bitflags::bitflags;

bitflags! {
    /// Highlight categories a profile enables.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HighlightFlags: u8 {
        const NUMBERS = 0b0000_0001;
        const STRINGS = 0b0000_0010;
    }
}

/// A language profile. Patterns starting with `.` match the file's final
/// extension exactly; any other pattern matches as a substring of the path.
#[derive(Debug, PartialEq, Eq)]
pub struct Syntax {
    pub name: &'static str,
    pub filematch: &'static [&'static str],
    pub flags: HighlightFlags,
}

pub static HIGHLIGHT_DB: &[Syntax] = &[
    Syntax {
        name: "c",
        filematch: &[".c", ".h", ".cpp"],
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
    Syntax {
        name: "rust",
        filematch: &[".rs"],
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
    Syntax {
        name: "python",
        filematch: &[".py"],
        flags: HighlightFlags::NUMBERS.union(HighlightFlags::STRINGS),
    },
    Syntax {
        name: "make",
        filematch: &["Makefile"],
        flags: HighlightFlags::NUMBERS,
    },
];

/// First profile in `HIGHLIGHT_DB` matching `filename`, in table order.
pub fn select_syntax(filename: &str) -> Option<&'static Syntax> {
    let ext = filename.rfind('.').map(|i| &filename[i..]);
    HIGHLIGHT_DB.iter().find(|syntax| {
        syntax.filematch.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                filename.contains(pattern)
            }
        })
    })
}
