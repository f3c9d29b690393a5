mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

// **** Private structures ****

// Counts categories while remembering the order in which they first appeared.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
struct OrderedCounter {
    positions: HashMap<String, usize>,
    counts: Vec<(String, u64)>,
}

impl OrderedCounter {
    fn add(&mut self, category: &str) {
        if let Some(idx) = self.positions.get(category) {
            self.counts[*idx].1 += 1;
        } else {
            self.positions
                .insert(category.to_string(), self.counts.len());
            self.counts.push((category.to_string(), 1));
        }
    }

    fn into_tally(self) -> Tally {
        self.counts
    }
}

/// Keeps the records that pass both filters, in their original order.
///
/// Filtering an already filtered collection with the same filters returns
/// the same records.
pub fn filter_records<'a, I>(records: I, filters: &Filters) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| record_passes(r, filters))
        .collect()
}

/// The predicate behind [`filter_records`].
pub fn record_passes(record: &Record, filters: &Filters) -> bool {
    filters.employee.matches(record.get(Field::Identity))
        && filters.satisfaction.matches(record.get(Field::Satisfaction))
}

/// Counts the records per distinct value of a field.
///
/// Records without an answer for this field are not counted. Categories come
/// out in the order in which they were first seen.
pub fn distinct_value_counts<'a, I>(records: I, field: Field) -> Tally
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counter = OrderedCounter::default();
    for r in records {
        if let Some(v) = r.answer(field) {
            counter.add(v);
        }
    }
    counter.into_tally()
}

/// Counts labels in a field that may hold several of them.
///
/// Each record contributes one unit to every label it lists, so the sum of
/// the counts may exceed the number of records. The value is split on the
/// literal `delimiter` only: `"Sales,Ops"` split on `", "` is the single label
/// `"Sales,Ops"`. Labels are trimmed and empty segments are skipped. There is
/// no escaping, a label that contains the delimiter is split in two.
///
/// A value made only of delimiters and spaces, such as `", "`, is answered but
/// yields no label: that record contributes nothing to the tally.
pub fn multi_value_tally<'a, I>(records: I, field: Field, delimiter: &str) -> Tally
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counter = OrderedCounter::default();
    for r in records {
        let raw = match r.answer(field) {
            Some(raw) => raw,
            None => continue,
        };
        let labels = split_labels(raw, delimiter);
        debug!("multi_value_tally: {:?} -> {:?}", raw, labels);
        for label in labels {
            counter.add(label);
        }
    }
    counter.into_tally()
}

fn split_labels<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        let label = raw.trim();
        return if label.is_empty() { vec![] } else { vec![label] };
    }
    raw.split(delimiter)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The distinct values of the identity field, in first-seen order.
///
/// This must be called on the full table, so that the selector of one filter
/// never loses options because of the other one.
///
/// Respondents without a name are not listed. They can still be selected with
/// the filter `Filter::Exact("")`, which only the configuration file or the
/// command line can provide.
pub fn distinct_identities<'a, I>(table: I, identity_field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for r in table {
        if let Some(id) = r.answer(identity_field) {
            if seen.insert(id) {
                res.push(id.to_string());
            }
        }
    }
    res
}

/// Computes all the views of the dashboard for the given filters.
///
/// Arguments:
/// * `table` the full, unfiltered table
/// * `filters` the current state of the selectors
pub fn build_views(table: &[Record], filters: &Filters) -> DashboardViews {
    let filtered = filter_records(table, filters);
    info!(
        "build_views: {} of {} records selected with filters employee={} satisfaction={}",
        filtered.len(),
        table.len(),
        filters.employee,
        filters.satisfaction
    );

    let views = DashboardViews {
        employees: distinct_identities(table, Field::Identity),
        satisfaction_levels: SATISFACTION_LEVELS.iter().map(|s| s.to_string()).collect(),
        satisfaction: distinct_value_counts(filtered.iter().copied(), Field::Satisfaction),
        interest_in_change: distinct_value_counts(
            filtered.iter().copied(),
            Field::InterestInChange,
        ),
        preferred_sectors: multi_value_tally(
            filtered.iter().copied(),
            Field::PreferredSectors,
            SECTOR_DELIMITER,
        ),
        feedback: filtered.into_iter().cloned().collect(),
    };
    debug!("build_views: {:?}", views);
    views
}

#[cfg(test)]
mod tests {
    use super::builder::Builder;
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn tally(pairs: &[(&str, u64)]) -> Tally {
        pairs.iter().map(|(s, c)| (s.to_string(), *c)).collect()
    }

    fn scenario_table() -> Vec<Record> {
        let mut b = Builder::new();
        b.add_record(&[
            (Field::Identity, "Ana"),
            (Field::Satisfaction, "4"),
            (Field::PreferredSectors, "Sales, Ops"),
        ]);
        b.add_record(&[
            (Field::Identity, "Bo"),
            (Field::Satisfaction, "4"),
            (Field::PreferredSectors, ""),
        ]);
        b.build()
    }

    fn mixed_table() -> Vec<Record> {
        let mut b = Builder::new();
        b.add_record(&[
            (Field::Identity, "Ana"),
            (Field::Satisfaction, "4"),
            (Field::InterestInChange, "Sim"),
            (Field::PreferredSectors, "Sales, Ops"),
        ]);
        b.add_record(&[
            (Field::Identity, "Bo"),
            (Field::Satisfaction, "2"),
            (Field::InterestInChange, "Não"),
        ]);
        b.add_record(&[
            (Field::Identity, "Caio"),
            (Field::Satisfaction, ""),
            (Field::InterestInChange, "Talvez"),
            (Field::PreferredSectors, "Finance"),
        ]);
        b.add_record(&[
            (Field::Identity, "Ana"),
            (Field::Satisfaction, "5"),
            (Field::InterestInChange, "Sim"),
            (Field::PreferredSectors, "Ops, Finance, Sales"),
        ]);
        b.add_record(&[(Field::Satisfaction, "4")]);
        b.build()
    }

    #[test]
    fn scenario_no_filters() {
        init();
        let table = scenario_table();
        let filtered = filter_records(&table, &Filters::NONE);
        assert_eq!(filtered.len(), 2);
        assert_eq!(
            distinct_value_counts(filtered.iter().copied(), Field::Satisfaction),
            tally(&[("4", 2)])
        );
        assert_eq!(
            multi_value_tally(filtered, Field::PreferredSectors, SECTOR_DELIMITER),
            tally(&[("Sales", 1), ("Ops", 1)])
        );
    }

    #[test]
    fn scenario_filter_without_match() {
        init();
        let table = scenario_table();
        let filters = Filters::new("all", "5");
        let filtered = filter_records(&table, &filters);
        assert!(filtered.is_empty());

        let views = build_views(&table, &filters);
        assert!(views.satisfaction.is_empty());
        assert!(views.interest_in_change.is_empty());
        assert!(views.preferred_sectors.is_empty());
        assert!(views.feedback.is_empty());
        // The employee options do not depend on the filters.
        assert_eq!(views.employees, vec!["Ana".to_string(), "Bo".to_string()]);
    }

    #[test]
    fn single_label_without_delimiter() {
        let mut b = Builder::new();
        b.add_record(&[(Field::PreferredSectors, "Finance")]);
        let table = b.build();
        assert_eq!(
            multi_value_tally(&table, Field::PreferredSectors, SECTOR_DELIMITER),
            tally(&[("Finance", 1)])
        );
    }

    #[test]
    fn comma_without_space_is_one_label() {
        let mut b = Builder::new();
        b.add_record(&[(Field::PreferredSectors, "Sales,Ops")]);
        let table = b.build();
        assert_eq!(
            multi_value_tally(&table, Field::PreferredSectors, SECTOR_DELIMITER),
            tally(&[("Sales,Ops", 1)])
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        let mut b = Builder::new();
        b.add_record(&[(Field::PreferredSectors, ", Sales")]);
        b.add_record(&[(Field::PreferredSectors, "Sales, ")]);
        b.add_record(&[(Field::PreferredSectors, "Ops, , Sales")]);
        b.add_record(&[(Field::PreferredSectors, ", ")]);
        let table = b.build();
        assert_eq!(
            multi_value_tally(&table, Field::PreferredSectors, SECTOR_DELIMITER),
            tally(&[("Sales", 3), ("Ops", 1)])
        );
    }

    #[test]
    fn labels_are_trimmed() {
        let mut b = Builder::new();
        b.add_record(&[(Field::PreferredSectors, " Sales ,  Ops")]);
        b.add_record(&[(Field::PreferredSectors, "Ops\n")]);
        let table = b.build();
        assert_eq!(
            multi_value_tally(&table, Field::PreferredSectors, SECTOR_DELIMITER),
            tally(&[("Sales", 1), ("Ops", 2)])
        );
    }

    #[test]
    fn filter_matches_exactly() {
        init();
        let table = mixed_table();
        for employee in ["all", "Ana", "Bo", "Caio", "Nobody", ""] {
            for satisfaction in ["all", "1", "2", "4", "5", ""] {
                let filters = Filters::new(employee, satisfaction);
                let filtered = filter_records(&table, &filters);
                let expected: Vec<&Record> = table
                    .iter()
                    .filter(|r| {
                        (employee == "all"
                            || r.identity.as_deref().unwrap_or("") == employee)
                            && (satisfaction == "all"
                                || r.satisfaction.as_deref().unwrap_or("") == satisfaction)
                    })
                    .collect();
                assert_eq!(filtered, expected, "filters {:?}", filters);
            }
        }
    }

    #[test]
    fn filter_does_not_normalize_values() {
        let mut b = Builder::new();
        b.add_record(&[(Field::Identity, "Ana\n"), (Field::Satisfaction, " 4")]);
        let table = b.build();
        assert!(filter_records(&table, &Filters::new("Ana", "all")).is_empty());
        assert!(filter_records(&table, &Filters::new("all", "4")).is_empty());
        assert_eq!(
            filter_records(&table, &Filters::new("Ana\n", " 4")).len(),
            1
        );
    }

    #[test]
    fn missing_field_only_matches_empty_filter() {
        let mut b = Builder::new();
        b.add_record(&[(Field::Satisfaction, "3")]);
        let table = b.build();
        assert!(filter_records(&table, &Filters::new("Ana", "all")).is_empty());
        assert_eq!(filter_records(&table, &Filters::new("", "all")).len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let table = mixed_table();
        for filters in [
            Filters::NONE,
            Filters::new("Ana", "all"),
            Filters::new("all", "4"),
            Filters::new("Ana", "5"),
        ] {
            let once = filter_records(&table, &filters);
            let twice = filter_records(once.iter().copied(), &filters);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn counts_are_conserved() {
        let table = mixed_table();
        let counts = distinct_value_counts(&table, Field::Satisfaction);
        let total: u64 = counts.iter().map(|(_, c)| *c).sum();
        let answered = table
            .iter()
            .filter(|r| r.answer(Field::Satisfaction).is_some())
            .count() as u64;
        assert_eq!(total, answered);
        assert_eq!(counts, tally(&[("4", 2), ("2", 1), ("5", 1)]));
    }

    #[test]
    fn no_blank_category() {
        let table = mixed_table();
        let counts = distinct_value_counts(&table, Field::PreferredSectors);
        assert!(counts.iter().all(|(c, _)| !c.is_empty()));
        let interest = distinct_value_counts(&table, Field::InterestInChange);
        assert_eq!(interest, tally(&[("Sim", 2), ("Não", 1), ("Talvez", 1)]));
    }

    #[test]
    fn multi_count_is_at_least_record_count() {
        let table = mixed_table();
        let sectors = multi_value_tally(&table, Field::PreferredSectors, SECTOR_DELIMITER);
        let total: u64 = sectors.iter().map(|(_, c)| *c).sum();
        // Records listing at least one sector, not merely answered ones.
        let with_labels = table
            .iter()
            .filter_map(|r| r.answer(Field::PreferredSectors))
            .filter(|v| !split_labels(v, SECTOR_DELIMITER).is_empty())
            .count() as u64;
        assert_eq!(with_labels, 3);
        assert_eq!(total, 6);
        assert!(total >= with_labels);
        assert_eq!(
            sectors,
            tally(&[("Sales", 2), ("Ops", 2), ("Finance", 2)])
        );

        // One label per record: equality.
        let mut b = Builder::new();
        b.add_record(&[(Field::PreferredSectors, "Finance")]);
        b.add_record(&[(Field::PreferredSectors, "Sales")]);
        let single = b.build();
        let total: u64 = multi_value_tally(&single, Field::PreferredSectors, SECTOR_DELIMITER)
            .iter()
            .map(|(_, c)| *c)
            .sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn delimiter_only_answer_yields_no_label() {
        let mut b = Builder::new();
        b.add_record(&[(Field::PreferredSectors, ", ")]);
        b.add_record(&[(Field::PreferredSectors, "Finance")]);
        let table = b.build();
        let sectors = multi_value_tally(&table, Field::PreferredSectors, SECTOR_DELIMITER);
        let total: u64 = sectors.iter().map(|(_, c)| *c).sum();
        // Two answered records, but only one of them lists a sector.
        let answered = table
            .iter()
            .filter(|r| r.answer(Field::PreferredSectors).is_some())
            .count() as u64;
        let with_labels = table
            .iter()
            .filter(|r| {
                r.answer(Field::PreferredSectors)
                    .map(|v| !split_labels(v, SECTOR_DELIMITER).is_empty())
                    .unwrap_or(false)
            })
            .count() as u64;
        assert_eq!(answered, 2);
        assert_eq!(with_labels, 1);
        assert_eq!(total, 1);
        assert!(total >= with_labels);
    }

    #[test]
    fn nameless_respondents_are_not_listed() {
        let mut b = Builder::new();
        b.add_record(&[(Field::Identity, ""), (Field::Satisfaction, "3")]);
        b.add_record(&[(Field::Identity, "Ana"), (Field::Satisfaction, "4")]);
        b.add_record(&[(Field::Satisfaction, "2")]);
        let table = b.build();
        assert_eq!(
            distinct_identities(&table, Field::Identity),
            vec!["Ana".to_string()]
        );
        // Still reachable with an explicit empty filter.
        let filtered = filter_records(&table, &Filters::new("", "all"));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn identities_ignore_the_satisfaction_filter() {
        let table = mixed_table();
        let expected = vec!["Ana".to_string(), "Bo".to_string(), "Caio".to_string()];
        assert_eq!(distinct_identities(&table, Field::Identity), expected);
        for satisfaction in ["all", "2", "5", "3"] {
            let views = build_views(&table, &Filters::new("all", satisfaction));
            assert_eq!(views.employees, expected);
        }
    }

    #[test]
    fn repeated_calls_are_stable() {
        let table = mixed_table();
        let filters = Filters::new("Ana", "all");
        let first = build_views(&table, &filters);
        let second = build_views(&table, &filters);
        assert_eq!(first, second);
        assert_eq!(first.feedback.len(), 2);
        assert_eq!(first.satisfaction, tally(&[("4", 1), ("5", 1)]));
        assert_eq!(first.interest_in_change, tally(&[("Sim", 2)]));
        assert_eq!(
            first.preferred_sectors,
            tally(&[("Sales", 2), ("Ops", 2), ("Finance", 1)])
        );
    }

    #[test]
    fn empty_table() {
        let views = build_views(&[], &Filters::NONE);
        assert!(views.employees.is_empty());
        assert!(views.feedback.is_empty());
        assert_eq!(views.satisfaction_levels.len(), 5);
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(Filter::from("all"), Filter::All);
        assert_eq!(Filter::from("All"), Filter::Exact("All".to_string()));
        assert_eq!(Filter::from(""), Filter::Exact("".to_string()));
        assert_eq!(Filter::from("4").to_string(), "4");
        assert_eq!(Filter::All.to_string(), "all");
    }
}
