//! 8840: ethnicity must be recorded with a valid code.

use cin_model::ChildCharacteristics;

use super::prelude::*;

const ETHNICITY_CODES: &[&str] = &[
    "WBRI", "WIRI", "WOTH", "WIRT", "WROM", "MWBC", "MWBA", "MWAS", "MOTH", "AIND", "APKN",
    "ABAN", "AOTH", "BCRB", "BAFR", "BOTH", "CHNE", "OOTH", "REFU", "NOBT",
];

pub fn rule() -> FnRule {
    FnRule::new(
        RuleDefinition::new(
            "8840",
            TableId::ChildCharacteristics,
            "Child's ethnicity is missing or invalid (see Ethnicity table)",
        )
        .affects([ChildCharacteristics::ETHNICITY]),
        validate,
    )
}

pub fn validate(tables: &TableSet, ctx: &mut RuleContext) -> Result<()> {
    let characteristics = tables.reader(TableId::ChildCharacteristics)?;
    let failing = characteristics.rows_where(ChildCharacteristics::ETHNICITY, |code| {
        code.is_none_or(|code| !ETHNICITY_CODES.contains(&code))
    })?;
    ctx.push_issue(
        TableId::ChildCharacteristics,
        ChildCharacteristics::ETHNICITY,
        failing,
    );
    Ok(())
}
