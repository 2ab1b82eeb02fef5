use indexmap::IndexMap;

/// Quote style of a string constant. UModel uses single quotes for asset
/// path payloads and double quotes for generic strings; some games rely on
/// the distinction downstream, so it is preserved as metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

/// Integer literal. `raw` keeps the source spelling (`0x1F`, `-12`), and
/// `clamped` is set when the value did not fit `i64` and was clamped to the
/// nearest representable bound.
#[derive(Debug, Clone, PartialEq)]
pub struct IntLit {
    pub value: i64,
    pub raw: String,
    pub clamped: bool,
}

/// Floating-point literal with its source spelling retained.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleLit {
    pub value: f64,
    pub raw: String,
}

/// Quoted string constant.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub text: String,
    pub quote: Quote,
}

/// A scalar constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(IntLit),
    Double(DoubleLit),
    Bool(bool),
    Str(StrLit),
    /// Call-shaped constant, e.g. `BLEND_Masked (1)`. The argument is
    /// always a numeric or boolean literal.
    Call { name: String, arg: Box<Scalar> },
    /// Bare identifier or unescaped-string constant.
    Word(String),
}

/// A typed cross-asset reference: class tag plus single-quoted payload,
/// e.g. `Texture2D'/Game/Textures/T_Rock_D.T_Rock_D'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathValue {
    pub class: String,
    pub target: String,
}

/// The value of a definition. Exactly one variant, decided structurally at
/// parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Brace-delimited ordered sequence of nested definitions.
    Block(Vec<Definition>),
    Path(PathValue),
    Scalar(Scalar),
    /// Brace-delimited comma-separated list of scalar constants. Never
    /// empty; a brace pair without typed elements is `EmptyList`.
    List(Vec<Scalar>),
    /// A brace pair containing only commas (or nothing): the array exists
    /// but holds zero typed elements. Distinct from an absent key and from
    /// a populated list.
    EmptyList,
}

/// A named, optionally indexed entry. `Materials[2] = ...` carries index 2;
/// indices are kept verbatim and may be sparse across a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub index: Option<u32>,
    pub value: Value,
}

/// The root of a parsed dump: top-level definitions in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub defs: Vec<Definition>,
}

/// Presence of an array-valued key: the importers reconstruct fixed-size
/// engine arrays and need all three states kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayState {
    Absent,
    Empty,
    Populated(usize),
}

impl Value {
    pub fn as_block(&self) -> Option<&[Definition]> {
        if let Value::Block(defs) = self {
            Some(defs)
        } else {
            None
        }
    }

    pub fn as_path(&self) -> Option<&PathValue> {
        if let Value::Path(p) = self {
            Some(p)
        } else {
            None
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        if let Value::Scalar(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        if let Value::List(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::EmptyList)
    }
}

impl Scalar {
    /// The textual form consumers usually want: string content, bare word,
    /// or call name. Numeric and boolean scalars return `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(&s.text),
            Scalar::Word(w) => Some(w),
            Scalar::Call { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(i.value as f64),
            Scalar::Double(d) => Some(d.value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Scalar::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Document {
    /// First definition with the given name, in source order.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.defs.iter().find(|d| d.name == name)
    }

    /// All definitions with the given name, in source order. Repeated names
    /// are how the format spells indexed array slots.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Definition> {
        self.defs.iter().filter(move |d| d.name == name)
    }

    /// `(index, value)` pairs for every definition with the given name, in
    /// source order. Indices are verbatim; reconstructing a dense array
    /// from sparse slots is the consumer's job.
    pub fn slots<'a>(&'a self, name: &str) -> Vec<(Option<u32>, &'a Value)> {
        self.defs
            .iter()
            .filter(|d| d.name == name)
            .map(|d| (d.index, &d.value))
            .collect()
    }

    /// Definitions grouped by name in first-seen order.
    pub fn grouped(&self) -> IndexMap<&str, Vec<&Definition>> {
        let mut map: IndexMap<&str, Vec<&Definition>> = IndexMap::new();
        for def in &self.defs {
            map.entry(def.name.as_str()).or_default().push(def);
        }
        map
    }

    /// Presence of an array-valued key (see [`ArrayState`]).
    pub fn array_state(&self, name: &str) -> ArrayState {
        match self.get(name) {
            None => ArrayState::Absent,
            Some(def) => match &def.value {
                Value::EmptyList => ArrayState::Empty,
                Value::List(items) => ArrayState::Populated(items.len()),
                Value::Block(defs) => ArrayState::Populated(defs.len()),
                _ => ArrayState::Populated(1),
            },
        }
    }
}
