//! Shared vocabulary for the CIN census validator: the table catalog and
//! rule identifiers.

pub mod error;
pub mod rule;
pub mod table;

pub use error::{ModelError, Result};
pub use rule::{RuleCode, RuleType};
pub use table::{
    Assessments, CINdetails, CINplanDates, ChildCharacteristics, ChildIdentifiers,
    ChildProtectionPlans, ColumnId, Disabilities, Header, Reviews, Section47, TableId,
};
