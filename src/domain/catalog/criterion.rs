//! Criterion - a typed dimension of comparison.
//!
//! A criterion is an entity (id + name) plus a [`CriterionDefinition`]
//! describing which values its matrix row accepts:
//!
//! - `Ordinal` / `Binary` rows accept only the declared option values
//! - `Ratio` rows accept any non-negative integer in the declared units

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::{EntityId, ValidationError};

use super::Entity;

/// Measurement type of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionKind {
    Ordinal,
    Binary,
    Ratio,
}

impl CriterionKind {
    /// Returns true for Ratio criteria.
    pub fn is_quantitative(&self) -> bool {
        matches!(self, CriterionKind::Ratio)
    }

    /// Returns true for Ordinal and Binary criteria.
    pub fn is_qualitative(&self) -> bool {
        !self.is_quantitative()
    }

    /// Parses the stored name of a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Ordinal" => Some(CriterionKind::Ordinal),
            "Binary" => Some(CriterionKind::Binary),
            "Ratio" => Some(CriterionKind::Ratio),
            _ => None,
        }
    }

    /// Returns the stored name of a kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionKind::Ordinal => "Ordinal",
            CriterionKind::Binary => "Binary",
            CriterionKind::Ratio => "Ratio",
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether higher values are better (benefit) or worse (cost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Cost,
    #[default]
    Benefit,
}

impl Direction {
    /// Parses the stored name of a direction.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cost" => Some(Direction::Cost),
            "benefit" => Some(Direction::Benefit),
            _ => None,
        }
    }

    /// Returns the stored name of a direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Cost => "cost",
            Direction::Benefit => "benefit",
        }
    }
}

/// One labelled value of an Ordinal or Binary criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriterionOption {
    pub label: String,
    pub value: i64,
}

impl CriterionOption {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Value domain of a criterion: labelled options or a unit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionScale {
    Options(Vec<CriterionOption>),
    Units(String),
}

/// Everything about a criterion except its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriterionDefinition {
    pub kind: CriterionKind,
    pub scale: CriterionScale,
    #[serde(default)]
    pub direction: Direction,
}

impl CriterionDefinition {
    /// An Ordinal definition over the given `(label, value)` options.
    pub fn ordinal<L: Into<String>>(options: impl IntoIterator<Item = (L, i64)>) -> Self {
        Self {
            kind: CriterionKind::Ordinal,
            scale: CriterionScale::Options(
                options
                    .into_iter()
                    .map(|(label, value)| CriterionOption::new(label, value))
                    .collect(),
            ),
            direction: Direction::Benefit,
        }
    }

    /// A Binary definition with exactly two options.
    pub fn binary(no: (impl Into<String>, i64), yes: (impl Into<String>, i64)) -> Self {
        Self {
            kind: CriterionKind::Binary,
            scale: CriterionScale::Options(vec![
                CriterionOption::new(no.0, no.1),
                CriterionOption::new(yes.0, yes.1),
            ]),
            direction: Direction::Benefit,
        }
    }

    /// A Ratio definition measured in `units`.
    pub fn ratio(units: impl Into<String>) -> Self {
        Self {
            kind: CriterionKind::Ratio,
            scale: CriterionScale::Units(units.into()),
            direction: Direction::Benefit,
        }
    }

    /// Sets the cost/benefit direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Checks that kind and scale agree.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.kind, &self.scale) {
            (CriterionKind::Ratio, CriterionScale::Units(_)) => Ok(()),
            (CriterionKind::Ratio, CriterionScale::Options(_)) => Err(
                ValidationError::invalid_format("scale", "Ratio criteria take units, not options"),
            ),
            (_, CriterionScale::Units(_)) => Err(ValidationError::invalid_format(
                "scale",
                format!("{} criteria take options, not units", self.kind),
            )),
            (kind, CriterionScale::Options(options)) => {
                if options.is_empty() {
                    return Err(ValidationError::empty_field("options"));
                }
                if *kind == CriterionKind::Binary && options.len() != 2 {
                    return Err(ValidationError::invalid_format(
                        "options",
                        format!("Binary criteria need exactly 2 options, got {}", options.len()),
                    ));
                }
                let mut seen = HashSet::new();
                if options.iter().any(|o| !seen.insert(o.value)) {
                    return Err(ValidationError::invalid_format(
                        "options",
                        "option values must be distinct",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// A selected dimension of comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    pub id: EntityId,
    pub name: String,
    pub kind: CriterionKind,
    pub scale: CriterionScale,
    pub direction: Direction,
}

impl Criterion {
    /// Combines a criteria-collection entity with its definition.
    pub fn new(entity: Entity, definition: CriterionDefinition) -> Result<Self, ValidationError> {
        definition.validate()?;
        if entity.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: entity.id,
            name: entity.name,
            kind: definition.kind,
            scale: definition.scale,
            direction: definition.direction,
        })
    }

    /// Returns the definition half of this criterion.
    pub fn definition(&self) -> CriterionDefinition {
        CriterionDefinition {
            kind: self.kind,
            scale: self.scale.clone(),
            direction: self.direction,
        }
    }

    pub fn is_quantitative(&self) -> bool {
        self.kind.is_quantitative()
    }

    pub fn is_qualitative(&self) -> bool {
        self.kind.is_qualitative()
    }

    /// Returns true if `value` lies in this criterion's value domain.
    pub fn accepts(&self, value: i64) -> bool {
        match &self.scale {
            CriterionScale::Units(_) => value >= 0,
            CriterionScale::Options(options) => options.iter().any(|o| o.value == value),
        }
    }

    /// Human-readable rendering of the valid values, as shown next to the
    /// criterion name in a data-entry template.
    ///
    /// `(1 = Low)(2 = High)` for option scales, `(# tonnes)` for units.
    pub fn describe_scale(&self) -> String {
        match &self.scale {
            CriterionScale::Options(options) => options
                .iter()
                .map(|o| format!("({} = {})", o.value, o.label))
                .collect(),
            CriterionScale::Units(units) => format!("(# {})", units),
        }
    }
}
