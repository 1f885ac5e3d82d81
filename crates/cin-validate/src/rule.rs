//! The rule seam.
//!
//! A rule is a definition paired with a validation body. Most rules are a
//! plain function wrapped in [`FnRule`]; the function stays callable on its
//! own so tests can drive it directly.

use std::fmt;

use crate::context::RuleContext;
use crate::definition::RuleDefinition;
use crate::error::Result;
use crate::tables::TableSet;

/// Signature of a rule body.
pub type ValidateFn = fn(&TableSet, &mut RuleContext) -> Result<()>;

pub trait Rule: Send + Sync {
    fn definition(&self) -> &RuleDefinition;

    /// Inspect `tables` and push any findings onto `ctx`.
    fn validate(&self, tables: &TableSet, ctx: &mut RuleContext) -> Result<()>;
}

/// A rule backed by a plain function.
#[derive(Clone)]
pub struct FnRule {
    definition: RuleDefinition,
    validate: ValidateFn,
}

impl FnRule {
    pub fn new(definition: RuleDefinition, validate: ValidateFn) -> Self {
        Self {
            definition,
            validate,
        }
    }
}

impl Rule for FnRule {
    fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    fn validate(&self, tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
        (self.validate)(tables, ctx)
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("code", &self.definition.code)
            .field("table", &self.definition.table)
            .finish_non_exhaustive()
    }
}
