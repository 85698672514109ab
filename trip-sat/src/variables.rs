//! Decision variables of a travel-planning problem.
//!
//! A [`Variable`] is created through the
//! [`VariableRegistry`](crate::engine::VariableRegistry), which hands out a [`VariableId`] that
//! is used to refer to the variable in [`Expression`](crate::expression::Expression)s.
use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// A handle to a variable declared in a [`VariableRegistry`](crate::engine::VariableRegistry).
///
/// Handles are dense and assigned in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId {
    id: u32,
}

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId { id: index as u32 }
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.id)
    }
}

/// The sort of a decision variable. Fixed at declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Integer,
    Boolean,
    Real,
}

impl VariableKind {
    /// Whether bounds are meaningful for this kind.
    pub fn is_numeric(self) -> bool {
        !matches!(self, VariableKind::Boolean)
    }
}

impl Display for VariableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableKind::Integer => write!(f, "int"),
            VariableKind::Boolean => write!(f, "bool"),
            VariableKind::Real => write!(f, "real"),
        }
    }
}

/// Optional inclusive bounds on a numeric variable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        min: None,
        max: None,
    };

    pub fn at_least(min: f64) -> Bounds {
        Bounds {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: f64, max: f64) -> Bounds {
        Bounds {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// A named, typed unknown the solver has to assign a value to.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    id: VariableId,
    name: String,
    kind: VariableKind,
    bounds: Bounds,
}

impl Variable {
    pub(crate) fn new(id: VariableId, name: String, kind: VariableKind, bounds: Bounds) -> Self {
        Variable {
            id,
            name,
            kind,
            bounds,
        }
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}
