// ********* Input data structures ***********

use std::fmt::Display;

/// The fields of a survey answer that the engine knows about.
///
/// The names are stable keys. How they map to the columns of an export is
/// decided by the reader, not by the engine.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Field {
    /// Identifies the respondent within one export.
    Identity,
    /// A level between 1 and 5, stored as text.
    Satisfaction,
    /// Whether the respondent wants to move to another sector.
    InterestInChange,
    /// Zero or more sector labels joined by `", "`.
    PreferredSectors,
    Reason,
    Learnings,
    SpecificRoleInterest,
    Tenure,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Identity,
        Field::Satisfaction,
        Field::InterestInChange,
        Field::PreferredSectors,
        Field::Reason,
        Field::Learnings,
        Field::SpecificRoleInterest,
        Field::Tenure,
    ];
}

/// One respondent's answers.
///
/// `None` means the export had no cell for this field, `Some("")` means the
/// cell was left empty. Both count as "no answer".
#[derive(Eq, PartialEq, Debug, Clone, Default, Hash)]
pub struct Record {
    pub identity: Option<String>,
    pub satisfaction: Option<String>,
    pub interest_in_change: Option<String>,
    pub preferred_sectors: Option<String>,
    pub reason: Option<String>,
    pub learnings: Option<String>,
    pub specific_role_interest: Option<String>,
    pub tenure: Option<String>,
}

impl Record {
    /// The raw value of a field, exactly as read from the source.
    pub fn get(&self, field: Field) -> Option<&str> {
        let v = match field {
            Field::Identity => &self.identity,
            Field::Satisfaction => &self.satisfaction,
            Field::InterestInChange => &self.interest_in_change,
            Field::PreferredSectors => &self.preferred_sectors,
            Field::Reason => &self.reason,
            Field::Learnings => &self.learnings,
            Field::SpecificRoleInterest => &self.specific_role_interest,
            Field::Tenure => &self.tenure,
        };
        v.as_deref()
    }

    /// The value of a field, only if the respondent actually answered.
    pub fn answer(&self, field: Field) -> Option<&str> {
        self.get(field).filter(|s| !s.is_empty())
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::Identity => &mut self.identity,
            Field::Satisfaction => &mut self.satisfaction,
            Field::InterestInChange => &mut self.interest_in_change,
            Field::PreferredSectors => &mut self.preferred_sectors,
            Field::Reason => &mut self.reason,
            Field::Learnings => &mut self.learnings,
            Field::SpecificRoleInterest => &mut self.specific_role_interest,
            Field::Tenure => &mut self.tenure,
        };
        *slot = value;
    }
}

// ********* Filters **********

/// The literal that selects every value of a field.
pub const ALL_SENTINEL: &str = "all";

/// A constraint on a single field.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Filter {
    /// No constraint.
    All,
    /// The raw field value must be equal, byte for byte.
    Exact(String),
}

impl Filter {
    /// Checks a raw field value against the filter.
    ///
    /// A missing value behaves like an empty string: it only matches `Exact("")`.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Filter::All => true,
            Filter::Exact(expected) => value.unwrap_or("") == expected.as_str(),
        }
    }
}

impl From<&str> for Filter {
    fn from(s: &str) -> Filter {
        if s == ALL_SENTINEL {
            Filter::All
        } else {
            Filter::Exact(s.to_string())
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "{}", ALL_SENTINEL),
            Filter::Exact(s) => write!(f, "{}", s),
        }
    }
}

/// The two selectors offered to the user.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Filters {
    pub employee: Filter,
    pub satisfaction: Filter,
}

impl Filters {
    pub const NONE: Filters = Filters {
        employee: Filter::All,
        satisfaction: Filter::All,
    };

    pub fn new(employee: &str, satisfaction: &str) -> Filters {
        Filters {
            employee: Filter::from(employee),
            satisfaction: Filter::from(satisfaction),
        }
    }
}

// ******** Output data structures *********

/// Pairs of (category, count), in the order the categories were first seen.
pub type Tally = Vec<(String, u64)>;

/// The separator used by forms to join multiple checkbox answers.
pub const SECTOR_DELIMITER: &str = ", ";

/// The options of the satisfaction selector.
pub const SATISFACTION_LEVELS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Everything a dashboard needs to render one state of the filters.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DashboardViews {
    /// The choices for the employee selector. Always computed on the full table.
    pub employees: Vec<String>,
    /// The choices for the satisfaction selector.
    pub satisfaction_levels: Vec<String>,
    pub satisfaction: Tally,
    pub interest_in_change: Tally,
    pub preferred_sectors: Tally,
    /// The filtered records, unchanged, for the detailed feedback list.
    pub feedback: Vec<Record>,
}
