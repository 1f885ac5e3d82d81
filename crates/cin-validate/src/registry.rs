//! Rule registry and whole-submission runs.

use std::collections::BTreeSet;

use tracing::{debug, info, info_span, warn};

use cin_model::RuleCode;

use crate::definition::RuleDefinition;
use crate::error::{Result, ValidateError};
use crate::report::{RuleOutcome, ValidationReport};
use crate::rule::Rule;
use crate::rules;
use crate::runner::run_rule;
use crate::tables::TableSet;

/// Which registered rules a run evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Run query (advisory) rules as well as error rules.
    pub include_queries: bool,
    /// Restrict the run to these codes. Empty means every rule.
    pub only: BTreeSet<RuleCode>,
    /// Codes never run, even when listed in `only`.
    pub skip: BTreeSet<RuleCode>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            include_queries: true,
            only: BTreeSet::new(),
            skip: BTreeSet::new(),
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn without_queries(mut self) -> Self {
        self.include_queries = false;
        self
    }

    #[must_use]
    pub fn only<I, C>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<RuleCode>,
    {
        self.only.extend(codes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn skip<I, C>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<RuleCode>,
    {
        self.skip.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Whether a rule with `definition` takes part in the run.
    pub fn selects(&self, definition: &RuleDefinition) -> bool {
        if definition.is_query() && !self.include_queries {
            return false;
        }
        if self.skip.contains(&definition.code) {
            return false;
        }
        self.only.is_empty() || self.only.contains(&definition.code)
    }
}

/// Rules in registration order, unique by code.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every rule in the built-in library.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();
        for rule in rules::all() {
            registry.register(rule)?;
        }
        debug!(rules = registry.len(), "standard rule registry built");
        Ok(registry)
    }

    /// Add a rule, rejecting a code that is already registered.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<()> {
        let code = &rule.definition().code;
        if self.get(code).is_some() {
            return Err(ValidateError::DuplicateRuleCode { code: code.clone() });
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Look up a rule by code.
    pub fn get(&self, code: &RuleCode) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| &rule.definition().code == code)
            .map(|rule| rule.as_ref())
    }

    pub fn definitions(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().map(|rule| rule.definition())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every selected rule against `tables`.
    ///
    /// A rule that fails is recorded as [`RuleOutcome::Failed`] and the run
    /// carries on with the next rule.
    pub fn run(&self, tables: &TableSet, options: &ValidationOptions) -> ValidationReport {
        let span = info_span!("validate", tables = tables.len());
        let _enter = span.enter();

        let mut outcomes = Vec::new();
        for rule in self.iter() {
            let definition = rule.definition();
            if !options.selects(definition) {
                debug!(code = %definition.code, "rule not selected");
                continue;
            }
            match run_rule(rule, tables) {
                Ok(ctx) => outcomes.push(RuleOutcome::Completed(ctx)),
                Err(error) => {
                    warn!(code = %definition.code, %error, "rule failed");
                    outcomes.push(RuleOutcome::Failed {
                        definition: definition.clone(),
                        error,
                    });
                }
            }
        }

        let report = ValidationReport::new(outcomes);
        info!(
            rules = report.outcomes().len(),
            errors = report.error_count(),
            queries = report.query_count(),
            failed = report.failed_rules().count(),
            "validation finished"
        );
        report
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.definitions().map(|definition| &definition.code))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RuleContext;
    use crate::rule::FnRule;
    use cin_model::TableId;

    fn noop(_tables: &TableSet, _ctx: &mut RuleContext) -> Result<()> {
        Ok(())
    }

    fn rule(code: &str) -> Box<dyn Rule> {
        Box::new(FnRule::new(
            RuleDefinition::new(code, TableId::Header, "msg"),
            noop,
        ))
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register(rule("100")).unwrap();
        let err = registry.register(rule(" 100 ")).unwrap_err();
        assert!(matches!(err, ValidateError::DuplicateRuleCode { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn standard_registry_has_unique_codes() {
        let registry = RuleRegistry::standard().unwrap();
        let codes: BTreeSet<_> = registry.definitions().map(|d| d.code.clone()).collect();
        assert_eq!(codes.len(), registry.len());
        assert!(registry.get(&RuleCode::from("8898q")).is_some());
    }

    #[test]
    fn options_select_by_code_and_type() {
        let error = RuleDefinition::new("100", TableId::Header, "msg");
        let query = RuleDefinition::new("2883", TableId::Header, "msg").query();

        let all = ValidationOptions::default();
        assert!(all.selects(&error));
        assert!(all.selects(&query));

        let no_queries = ValidationOptions::new().without_queries();
        assert!(no_queries.selects(&error));
        assert!(!no_queries.selects(&query));

        let only = ValidationOptions::new().only(["2883"]);
        assert!(!only.selects(&error));
        assert!(only.selects(&query));

        let skip = ValidationOptions::new().only(["100"]).skip(["100"]);
        assert!(!skip.selects(&error));
    }
}
