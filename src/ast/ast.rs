use std::fmt::{self, Display};

use crate::Span;

use super::types::Type;

/// Parser-assigned identity for nodes that later stages annotate.
///
/// Ids are unique within a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// An identifier together with where it was written.
///
/// Type, field and variable names all use this; the position an identifier
/// appears in decides its role, not its token.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// `#[a, b, c]`, a flat list of identifier flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub flags: Vec<Ident>,
    pub span: Span,
}

impl Attribute {
    pub fn has(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f.name == flag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegmentKind {
    /// Written as a leading `::` with nothing before it.
    Root,
    Super,
    Crate,
    Ident(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub kind: PathSegmentKind,
    /// Turbofish or generic arguments attached to this segment, as in
    /// `Vec::<T>::new` or `a::B<T>::C`.
    pub type_arguments: Vec<Type>,
    pub span: Span,
}

impl PathSegment {
    pub fn new(kind: PathSegmentKind, span: Span) -> Self {
        PathSegment {
            kind,
            type_arguments: Vec::new(),
            span,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            PathSegmentKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

/// A `::`-separated chain of segments. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
    pub span: Span,
}

impl Path {
    pub fn is_global(&self) -> bool {
        matches!(
            self.segments.first().map(|s| &s.kind),
            Some(PathSegmentKind::Root)
        )
    }

    /// Last segment's identifier, if it has one.
    pub fn last_name(&self) -> Option<&str> {
        self.segments.last().and_then(PathSegment::name)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "::")?;
            }
            match &segment.kind {
                PathSegmentKind::Root => {}
                PathSegmentKind::Super => write!(f, "super")?,
                PathSegmentKind::Crate => write!(f, "crate")?,
                PathSegmentKind::Ident(name) => write!(f, "{}", name)?,
            }
            if !segment.type_arguments.is_empty() {
                write!(f, "::<")?;
                write_comma_separated(f, &segment.type_arguments)?;
                write!(f, ">")?;
            }
        }
        Ok(())
    }
}

pub(crate) fn write_comma_separated<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
