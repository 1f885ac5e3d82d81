//! Overlapping date ranges within one table.
//!
//! Ranges are half-open `[start, end)`; a missing end leaves the range open.
//! Two ranges of the same child overlap when each starts before the other
//! ends. Rows without a child id or a start date are not compared.

use std::collections::HashMap;

use chrono::NaiveDate;

use cin_model::ColumnId;

use crate::column_reader::ColumnReader;
use crate::error::Result;
use crate::issue::{ErrorId, RowGroups};

#[derive(Debug, Clone, Copy)]
struct Span {
    row: usize,
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        let starts_before_other_ends = other.end.is_none_or(|end| self.start < end);
        let other_starts_before_end = self.end.is_none_or(|end| other.start < end);
        starts_before_other_ends && other_starts_before_end
    }
}

/// Group every overlapping pair of ranges that share a child id.
///
/// Each unordered pair is reported once under
/// `(child, earlier start, later start)` with both row positions.
pub fn overlapping_ranges(
    reader: &ColumnReader<'_>,
    child: ColumnId,
    start: ColumnId,
    end: ColumnId,
) -> Result<RowGroups> {
    let children = reader.strings(child)?;
    let starts = reader.dates(start)?;
    let ends = reader.dates(end)?;

    let mut order: Vec<&str> = Vec::new();
    let mut by_child: HashMap<&str, Vec<Span>> = HashMap::new();
    for (row, (child, start)) in children.iter().zip(&starts).enumerate() {
        let (Some(child), Some(start)) = (child.as_deref(), start) else {
            continue;
        };
        let spans = by_child.entry(child).or_insert_with(|| {
            order.push(child);
            Vec::new()
        });
        spans.push(Span {
            row,
            start: *start,
            end: ends[row],
        });
    }

    let mut groups = RowGroups::new();
    for child in order {
        let Some(spans) = by_child.get_mut(child) else {
            continue;
        };
        spans.sort_by_key(|span| (span.start, span.row));
        for (idx, earlier) in spans.iter().enumerate() {
            for later in &spans[idx + 1..] {
                if earlier.overlaps(later) {
                    let error_id = ErrorId::new([
                        child.to_string(),
                        earlier.start.to_string(),
                        later.start.to_string(),
                    ]);
                    groups.push_rows(error_id, [earlier.row, later.row]);
                }
            }
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cin_model::{CINplanDates, TableId};
    use polars::prelude::*;

    fn plans(rows: &[(&str, &str, Option<&str>)]) -> DataFrame {
        let children: Vec<&str> = rows.iter().map(|row| row.0).collect();
        let starts: Vec<&str> = rows.iter().map(|row| row.1).collect();
        let ends: Vec<Option<&str>> = rows.iter().map(|row| row.2).collect();
        df! {
            "LAchildID" => children,
            "CINPlanStartDate" => starts,
            "CINPlanEndDate" => ends,
        }
        .unwrap()
    }

    fn run(df: &DataFrame) -> RowGroups {
        let reader = ColumnReader::new(TableId::CINplanDates, df);
        overlapping_ranges(
            &reader,
            CINplanDates::LA_CHILD_ID,
            CINplanDates::CIN_PLAN_START_DATE,
            CINplanDates::CIN_PLAN_END_DATE,
        )
        .unwrap()
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let df = plans(&[
            ("child1", "2021-05-01", Some("2021-06-01")),
            ("child1", "2021-06-01", None),
        ]);
        assert!(run(&df).is_empty());
    }

    #[test]
    fn open_range_overlaps_later_start() {
        let df = plans(&[
            ("child2", "2021-07-01", Some("2021-08-01")),
            ("child1", "2021-05-01", None),
            ("child1", "2021-06-01", Some("2021-07-01")),
        ]);
        let groups = run(&df);
        assert_eq!(groups.len(), 1);
        let id = ErrorId::new(["child1", "2021-05-01", "2021-06-01"]);
        assert_eq!(groups.get(&id), Some(&[1, 2][..]));
    }

    #[test]
    fn different_children_never_overlap() {
        let df = plans(&[
            ("child1", "2021-05-01", None),
            ("child2", "2021-05-01", None),
        ]);
        assert!(run(&df).is_empty());
    }

    #[test]
    fn each_pair_reported_once() {
        let df = plans(&[
            ("child1", "2021-05-01", None),
            ("child1", "2021-05-01", None),
            ("child1", "2021-06-01", None),
        ]);
        let groups = run(&df);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.row_count(), 6);
    }
}
