/// Lexical dialect of a props.txt dump.
///
/// UModel/UEViewer changed the notation between tool generations: older
/// exports use a permissive identifier class (spaces, hyphens and slashes
/// inside names) and no comment support, newer exports use plain
/// identifiers plus an unescaped-string fallback for free-form values.
/// Callers pick the dialect matching their export tool; guessing is not
/// attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Identifier character policy.
    pub idents: IdentStyle,
    /// Skip `//` line comments. Older exports never contain comments, but
    /// skipping them is harmless, so both presets enable this.
    pub line_comments: bool,
    /// Fall back to an unescaped bare string (any run excluding `,`, `}`
    /// and newline) when no other terminal matches a value.
    pub bare_strings: bool,
    /// Minimum number of elements in a const list. A brace pair holding
    /// fewer typed elements parses as the empty-list variant.
    pub min_list_items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentStyle {
    /// Letters, digits, `_`, space, `-` and `/`; trailing spaces trimmed.
    Legacy,
    /// Letters, digits and `_`, not starting with a digit.
    Modern,
}

impl Dialect {
    /// Older UModel exports: permissive identifiers, no bare-string
    /// fallback.
    pub fn legacy() -> Self {
        Dialect {
            idents: IdentStyle::Legacy,
            line_comments: true,
            bare_strings: false,
            min_list_items: 1,
        }
    }

    /// Newer UModel/FModel exports: strict identifiers, bare-string
    /// fallback for free-form values.
    pub fn modern() -> Self {
        Dialect {
            idents: IdentStyle::Modern,
            line_comments: true,
            bare_strings: true,
            min_list_items: 1,
        }
    }

    pub(crate) fn is_ident_start(&self, c: char) -> bool {
        match self.idents {
            IdentStyle::Legacy => c.is_alphabetic() || c == '_' || c == '-' || c == '/',
            IdentStyle::Modern => c.is_alphabetic() || c == '_',
        }
    }

    pub(crate) fn is_ident_continue(&self, c: char) -> bool {
        match self.idents {
            IdentStyle::Legacy => {
                c.is_alphanumeric() || c == '_' || c == ' ' || c == '-' || c == '/'
            }
            IdentStyle::Modern => c.is_alphanumeric() || c == '_',
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::modern()
    }
}
