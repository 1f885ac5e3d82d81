//! Built-in business rules.
//!
//! Each module exposes `rule()`, pairing the rule's definition with its
//! `validate` function. `validate` stays public so it can be called on its
//! own with a hand-built table set and context.

mod prelude {
    pub(crate) use crate::context::RuleContext;
    pub(crate) use crate::definition::RuleDefinition;
    pub(crate) use crate::error::Result;
    pub(crate) use crate::issue::{ErrorId, RowGroups};
    pub(crate) use crate::rule::FnRule;
    pub(crate) use crate::tables::TableSet;
    pub(crate) use cin_model::TableId;
}

pub mod rule_100;
pub mod rule_1540;
pub mod rule_2883;
pub mod rule_2886q;
pub mod rule_4001;
pub mod rule_4014;
pub mod rule_8500;
pub mod rule_8525;
pub mod rule_8610;
pub mod rule_8620;
pub mod rule_8675;
pub mod rule_8815;
pub mod rule_8840;
pub mod rule_8898q;

use crate::rule::Rule;

/// Every built-in rule, in registration order.
pub fn all() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(rule_100::rule()),
        Box::new(rule_8500::rule()),
        Box::new(rule_8525::rule()),
        Box::new(rule_1540::rule()),
        Box::new(rule_8840::rule()),
        Box::new(rule_8610::rule()),
        Box::new(rule_8898q::rule()),
        Box::new(rule_8815::rule()),
        Box::new(rule_4001::rule()),
        Box::new(rule_8620::rule()),
        Box::new(rule_2886q::rule()),
        Box::new(rule_4014::rule()),
        Box::new(rule_8675::rule()),
        Box::new(rule_2883::rule()),
    ]
}
