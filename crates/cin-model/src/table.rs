//! Census table catalog.
//!
//! Every CIN return is a set of relational tables. Rules address those tables
//! through [`TableId`] and their columns through the [`ColumnId`] constants
//! exposed on one namespace type per table, e.g. `ChildIdentifiers::UPN`.
//!
//! Column identity is per table: `CINdetails::LA_CHILD_ID` and
//! `Section47::LA_CHILD_ID` both render as `LAchildID` but compare unequal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A column of one census table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId {
    table: TableId,
    name: &'static str,
}

impl ColumnId {
    const fn new(table: TableId, name: &'static str) -> Self {
        Self { table, name }
    }

    /// The table owning this column.
    pub const fn table(self) -> TableId {
        self.table
    }

    /// Column name as it appears in the submission.
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// `Table.Column` rendering, unambiguous across tables.
    pub fn qualified_name(self) -> String {
        format!("{}.{}", self.table.name(), self.name)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for ColumnId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

macro_rules! census_tables {
    ($(
        $(#[$meta:meta])*
        $table:ident => $name:literal {
            $($konst:ident => $column:literal),+ $(,)?
        }
    )+) => {
        /// Identifier of a census table.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum TableId {
            $($(#[$meta])* $table,)+
        }

        impl TableId {
            /// All tables in catalog order.
            pub const ALL: &'static [TableId] = &[$(TableId::$table,)+];

            /// Table name as used in submissions and file names.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TableId::$table => $name,)+
                }
            }

            /// Columns owned by this table, in submission order.
            pub const fn columns(self) -> &'static [ColumnId] {
                match self {
                    $(TableId::$table => $table::COLUMNS,)+
                }
            }
        }

        $(
            #[doc = concat!("Columns of the `", $name, "` table.")]
            #[derive(Debug, Clone, Copy)]
            pub struct $table;

            impl $table {
                $(
                    #[doc = concat!("`", $name, ".", $column, "`")]
                    pub const $konst: ColumnId = ColumnId::new(TableId::$table, $column);
                )+

                pub const COLUMNS: &'static [ColumnId] = &[$(Self::$konst,)+];
            }
        )+
    };
}

census_tables! {
    /// Submission metadata, a single row.
    Header => "Header" {
        COLLECTION => "Collection",
        YEAR => "Year",
        REFERENCE_DATE => "ReferenceDate",
        SOURCE_LEVEL => "SourceLevel",
        LEA => "LEA",
        SOFTWARE_CODE => "SoftwareCode",
        RELEASE => "Release",
        SERIAL_NO => "SerialNo",
        DATE_TIME => "DateTime",
    }
    ChildIdentifiers => "ChildIdentifiers" {
        LA_CHILD_ID => "LAchildID",
        UPN => "UPN",
        FORMER_UPN => "FormerUPN",
        UPN_UNKNOWN => "UPNunknown",
        PERSON_BIRTH_DATE => "PersonBirthDate",
        EXPECTED_PERSON_BIRTH_DATE => "ExpectedPersonBirthDate",
        GENDER_CURRENT => "GenderCurrent",
        PERSON_DEATH_DATE => "PersonDeathDate",
    }
    ChildCharacteristics => "ChildCharacteristics" {
        LA_CHILD_ID => "LAchildID",
        ETHNICITY => "Ethnicity",
    }
    Disabilities => "Disabilities" {
        LA_CHILD_ID => "LAchildID",
        DISABILITY => "Disability",
    }
    /// One row per referral ("CIN module").
    CINdetails => "CINdetails" {
        LA_CHILD_ID => "LAchildID",
        CIN_DETAILS_ID => "CINdetailsID",
        CIN_REFERRAL_DATE => "CINreferralDate",
        REFERRAL_SOURCE => "ReferralSource",
        PRIMARY_NEED_CODE => "PrimaryNeedCode",
        CIN_CLOSURE_DATE => "CINclosureDate",
        REASON_FOR_CLOSURE => "ReasonForClosure",
        DATE_OF_INITIAL_CPC => "DateOfInitialCPC",
        REFERRAL_NFA => "ReferralNFA",
    }
    Assessments => "Assessments" {
        LA_CHILD_ID => "LAchildID",
        CIN_DETAILS_ID => "CINdetailsID",
        ASSESSMENT_ID => "AssessmentID",
        ASSESSMENT_ACTUAL_START_DATE => "AssessmentActualStartDate",
        ASSESSMENT_INTERNAL_REVIEW_DATE => "AssessmentInternalReviewDate",
        ASSESSMENT_AUTHORISATION_DATE => "AssessmentAuthorisationDate",
        ASSESSMENT_FACTORS => "AssessmentFactors",
    }
    CINplanDates => "CINplanDates" {
        LA_CHILD_ID => "LAchildID",
        CIN_DETAILS_ID => "CINdetailsID",
        CIN_PLAN_START_DATE => "CINPlanStartDate",
        CIN_PLAN_END_DATE => "CINPlanEndDate",
    }
    Section47 => "Section47" {
        LA_CHILD_ID => "LAchildID",
        CIN_DETAILS_ID => "CINdetailsID",
        S47_ACTUAL_START_DATE => "S47ActualStartDate",
        INITIAL_CPC_TARGET => "InitialCPCtarget",
        DATE_OF_INITIAL_CPC => "DateOfInitialCPC",
        ICPC_NOT_REQUIRED => "ICPCnotRequired",
    }
    ChildProtectionPlans => "ChildProtectionPlans" {
        LA_CHILD_ID => "LAchildID",
        CIN_DETAILS_ID => "CINdetailsID",
        CPP_ID => "CPPID",
        CPP_START_DATE => "CPPstartDate",
        CPP_END_DATE => "CPPendDate",
        INITIAL_CATEGORY_OF_ABUSE => "InitialCategoryOfAbuse",
        LATEST_CATEGORY_OF_ABUSE => "LatestCategoryOfAbuse",
        NUMBER_OF_PREVIOUS_CPP => "NumberOfPreviousCPP",
    }
    Reviews => "Reviews" {
        LA_CHILD_ID => "LAchildID",
        CIN_DETAILS_ID => "CINdetailsID",
        CPP_ID => "CPPID",
        CPP_REVIEW_DATE => "CPPreviewDate",
    }
}

impl TableId {
    /// Look up one of this table's columns by its submission name.
    pub fn column(self, name: &str) -> Option<ColumnId> {
        self.columns()
            .iter()
            .copied()
            .find(|column| column.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TableId::ALL
            .iter()
            .copied()
            .find(|table| table.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownTable(s.to_string()))
    }
}
