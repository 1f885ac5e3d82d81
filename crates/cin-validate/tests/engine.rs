//! Integration tests for running rules and the standard registry.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use cin_model::{CINplanDates, ChildProtectionPlans, Header, RuleCode, TableId};
use cin_validate::{
    ErrorId, RuleOutcome, RuleRegistry, TableSet, ValidateError, ValidationOptions, rules,
    run_rule,
};

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn header() -> DataFrame {
    test_df(vec![
        ("Year", vec![Some("2022")]),
        ("ReferenceDate", vec![Some("31/03/2022")]),
    ])
}

fn submission() -> TableSet {
    TableSet::new()
        .with_table(TableId::Header, header())
        .with_table(
            TableId::ChildIdentifiers,
            test_df(vec![
                ("LAchildID", vec![Some("child1"), None]),
                ("UPN", vec![Some("A12345678901B"), Some("bad")]),
                ("UPNunknown", vec![None, Some("UN1")]),
                ("PersonBirthDate", vec![Some("2015-02-01"), Some("1990-01-01")]),
            ]),
        )
        .with_table(
            TableId::ChildCharacteristics,
            test_df(vec![("Ethnicity", vec![Some("WBRI"), Some("ZZZZ")])]),
        )
        .with_table(
            TableId::CINdetails,
            test_df(vec![
                ("LAchildID", vec![Some("child1"), Some("child1")]),
                ("CINdetailsID", vec![Some("cinID1"), Some("cinID2")]),
                ("CINreferralDate", vec![Some("2021-05-01"), Some("2021-09-01")]),
                ("PrimaryNeedCode", vec![Some("N1"), Some("N2")]),
                ("ReferralNFA", vec![Some("false"), Some("false")]),
                ("CINclosureDate", vec![None, None]),
                ("DateOfInitialCPC", vec![Some("2021-06-01"), None]),
            ]),
        )
        .with_table(
            TableId::Section47,
            test_df(vec![
                ("LAchildID", vec![Some("child1")]),
                ("CINdetailsID", vec![Some("cinID1")]),
                ("S47ActualStartDate", vec![Some("2021-05-02")]),
                ("InitialCPCtarget", vec![Some("2021-05-21")]),
                ("DateOfInitialCPC", vec![Some("2021-05-20")]),
            ]),
        )
        .with_table(
            TableId::CINplanDates,
            test_df(vec![
                ("LAchildID", vec![Some("child1"), Some("child1")]),
                ("CINdetailsID", vec![Some("cinID1"), Some("cinID1")]),
                ("CINPlanStartDate", vec![Some("2021-05-10"), Some("2021-07-01")]),
                ("CINPlanEndDate", vec![Some("2021-08-01"), None]),
            ]),
        )
        .with_table(
            TableId::ChildProtectionPlans,
            test_df(vec![
                ("LAchildID", vec![Some("child1")]),
                ("CINdetailsID", vec![Some("cinID1")]),
                ("CPPstartDate", vec![Some("2021-06-01")]),
                ("CPPendDate", vec![None]),
            ]),
        )
}

fn flagged_codes(report: &cin_validate::ValidationReport) -> Vec<String> {
    report
        .summaries()
        .into_iter()
        .filter(|summary| summary.issue_count > 0)
        .map(|summary| summary.code.to_string())
        .collect()
}

#[test]
fn test_standard_registry_reports_each_rule() {
    let registry = RuleRegistry::standard().unwrap();
    let report = registry.run(&submission(), &ValidationOptions::default());

    assert_eq!(report.outcomes().len(), registry.len());
    assert_eq!(report.failed_rules().count(), 0);
    assert_eq!(
        flagged_codes(&report),
        ["8500", "8525", "1540", "8840", "8898Q", "8815", "4001", "4014"]
    );
    assert!(report.has_blocking_issues());
}

#[test]
fn test_options_filter_rules() {
    let registry = RuleRegistry::standard().unwrap();
    let options = ValidationOptions::new()
        .only(["8500", "8898q", "4001"])
        .skip(["4001"])
        .without_queries();
    let report = registry.run(&submission(), &options);

    let ran: Vec<_> = report
        .outcomes()
        .iter()
        .map(|outcome| outcome.definition().code.clone())
        .collect();
    assert_eq!(ran, vec![RuleCode::from("8500")]);
}

#[test]
fn test_missing_table_fails_only_that_rule() {
    let registry = RuleRegistry::standard().unwrap();
    let tables = TableSet::new().with_table(TableId::Header, header());
    let report = registry.run(&tables, &ValidationOptions::new().only(["100", "4014"]));

    let outcomes = report.outcomes();
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(outcomes[0], RuleOutcome::Completed(_)));
    assert!(matches!(
        outcomes[1].error(),
        Some(ValidateError::MissingTable {
            table: TableId::CINplanDates
        })
    ));
    assert!(report.has_blocking_issues());
}

#[test]
fn test_rules_are_idempotent() {
    let tables = submission();
    for rule in rules::all() {
        let first = run_rule(rule.as_ref(), &tables).unwrap();
        let second = run_rule(rule.as_ref(), &tables).unwrap();
        assert_eq!(
            first.all_issues(),
            second.all_issues(),
            "rule {} is not deterministic",
            rule.definition().code
        );
    }
}

#[test]
fn test_rules_do_not_change_inputs() {
    let tables = submission();
    let before: Vec<_> = tables
        .ids()
        .map(|table| tables.get(table).unwrap().clone())
        .collect();
    RuleRegistry::standard()
        .unwrap()
        .run(&tables, &ValidationOptions::default());
    for (table, original) in tables.ids().zip(&before) {
        assert!(tables.get(table).unwrap().equals_missing(original));
    }
}

#[test]
fn test_cross_table_error_ids_align() {
    let tables = submission();
    let ctx = run_rule(&rules::rule_4001::rule(), &tables).unwrap();
    let issues = ctx.type2_issues();
    assert_eq!(issues.len(), 2);

    let protection: BTreeSet<&ErrorId> = issues[0].groups.error_ids().collect();
    let plans: BTreeSet<&ErrorId> = issues[1].groups.error_ids().collect();
    assert_eq!(protection, plans);
    assert_eq!(issues[0].columns[0], ChildProtectionPlans::LA_CHILD_ID);
    assert_eq!(issues[1].columns[0], CINplanDates::LA_CHILD_ID);
}

#[test]
fn test_cross_table_violation_counts_once() {
    let tables = TableSet::new()
        .with_table(
            TableId::ChildProtectionPlans,
            test_df(vec![
                ("LAchildID", vec![Some("child1")]),
                ("CINdetailsID", vec![Some("cinID1")]),
                ("CPPendDate", vec![None]),
            ]),
        )
        .with_table(
            TableId::CINplanDates,
            test_df(vec![
                ("LAchildID", vec![Some("child1")]),
                ("CINdetailsID", vec![Some("cinID1")]),
                ("CINPlanEndDate", vec![None]),
            ]),
        );
    let report = RuleRegistry::standard()
        .unwrap()
        .run(&tables, &ValidationOptions::new().only(["4001"]));

    let summaries = report.summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].issue_count, 1);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.records().len(), 2);
}

#[test]
fn test_grouped_row_ids_index_input_rows() {
    let tables = submission();
    for rule in rules::all() {
        let ctx = run_rule(rule.as_ref(), &tables).unwrap();
        for issue in ctx.type2_issues().into_iter().chain(ctx.type3_issues()) {
            let height = tables.get(issue.table).unwrap().height();
            assert!(issue.groups.row_ids().all(|row| row < height));
        }
    }
}

#[test]
fn test_header_cell_issue() {
    let tables = TableSet::new().with_table(
        TableId::Header,
        test_df(vec![
            ("Year", vec![Some("2022"), Some("2022"), Some("2022")]),
            (
                "ReferenceDate",
                vec![Some("2022-03-31"), None, Some("2021-11-30")],
            ),
        ]),
    );
    let ctx = run_rule(&rules::rule_100::rule(), &tables).unwrap();
    let rows: Vec<_> = ctx.issues().map(|issue| issue.row).collect();
    assert_eq!(rows, vec![1, 2]);
    assert!(ctx.issues().all(|issue| issue.field == Header::REFERENCE_DATE));
}
