pub use crate::config::*;

/// A builder for assembling a table of survey answers.
///
/// The readers use it to turn rows into records, and it is the shortest way
/// to write a table by hand.
///
/// ```
/// use survey_aggregation::builder::Builder;
/// use survey_aggregation::Field;
///
/// let mut builder = Builder::new();
/// builder.add_record(&[(Field::Identity, "Ana"), (Field::Satisfaction, "4")]);
/// builder.add_record(&[(Field::Identity, "Bo")]);
///
/// let table = builder.build();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table[1].get(Field::Satisfaction), None);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    pub(crate) _records: Vec<Record>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _records: Vec::new(),
        }
    }

    /// Adds a record made of the given fields. Fields not listed stay absent.
    ///
    /// If a field is listed more than once, the last value wins.
    pub fn add_record(&mut self, fields: &[(Field, &str)]) {
        let mut record = Record::default();
        for (field, value) in fields {
            record.set(*field, Some(value.to_string()));
        }
        self.add_record_2(record);
    }

    pub fn add_record_2(&mut self, record: Record) {
        self._records.push(record);
    }

    pub fn len(&self) -> usize {
        self._records.len()
    }

    pub fn is_empty(&self) -> bool {
        self._records.is_empty()
    }

    pub fn build(self) -> Vec<Record> {
        self._records
    }
}
