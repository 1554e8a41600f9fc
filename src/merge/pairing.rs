//! Subject pairing between the two condition lists.
//!
//! Records are matched on subject id rather than list position, so the
//! order in which directories were visited does not decide which readings
//! end up on the same row.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::record::{Condition, Record};

/// Records of one subject under both conditions.
#[derive(Debug, Clone, Copy)]
pub struct RecordPair<'a> {
    /// Record from the first list.
    pub first: &'a Record,
    /// Matching record from the second list.
    pub second: &'a Record,
}

/// Pair every record of `first` with the record of the same subject in
/// `second`.
///
/// Pairs follow the order of `first`.
///
/// # Errors
///
/// Returns an error if:
/// - The lists differ in length
/// - A list mixes conditions, or both lists hold the same condition
/// - A subject id occurs twice in one list
/// - A subject has no counterpart in `second`
/// - The two records of a subject disagree on genotype or gender
pub fn pair_records<'a>(first: &'a [Record], second: &'a [Record]) -> Result<Vec<RecordPair<'a>>> {
    if first.len() != second.len() {
        return Err(Error::ConditionListLength {
            first: first.len(),
            second: second.len(),
        });
    }

    let (Some(head), Some(other_head)) = (first.first(), second.first()) else {
        return Ok(Vec::new());
    };

    let first_condition = head.condition();
    let second_condition = first_condition.other();
    if other_head.condition() != second_condition {
        return Err(Error::MixedConditions {
            subject: other_head.id().to_string(),
            expected: second_condition,
            found: other_head.condition(),
        });
    }

    index_by_id(first, first_condition)?;
    let by_id = index_by_id(second, second_condition)?;

    first
        .iter()
        .map(|record| {
            let counterpart = by_id
                .get(record.id())
                .copied()
                .ok_or_else(|| Error::UnpairedSubject {
                    subject: record.id().to_string(),
                    condition: second_condition,
                })?;
            check_identity(record, counterpart)?;
            Ok(RecordPair {
                first: record,
                second: counterpart,
            })
        })
        .collect()
}

/// Index a homogeneous list by subject id.
fn index_by_id(records: &[Record], condition: Condition) -> Result<HashMap<&str, &Record>> {
    let mut index = HashMap::with_capacity(records.len());

    for record in records {
        if record.condition() != condition {
            return Err(Error::MixedConditions {
                subject: record.id().to_string(),
                expected: condition,
                found: record.condition(),
            });
        }
        if index.insert(record.id(), record).is_some() {
            return Err(Error::DuplicateSubject {
                subject: record.id().to_string(),
                condition,
            });
        }
    }

    Ok(index)
}

fn check_identity(first: &Record, second: &Record) -> Result<()> {
    let (a, b) = (first.subject(), second.subject());
    if a.genotype != b.genotype || a.gender != b.gender {
        return Err(Error::SubjectMismatch {
            subject: a.id.clone(),
            first_genotype: a.genotype,
            first_gender: a.gender.clone(),
            second_genotype: b.genotype,
            second_gender: b.gender.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::{Genotype, Metabolite, MetaboliteReading, SubjectMeta};

    fn record(id: &str, gender: &str, condition: Condition) -> Record {
        Record::new(
            SubjectMeta {
                id: id.to_string(),
                genotype: Genotype::Transgenic,
                gender: gender.to_string(),
            },
            condition,
            vec![Metabolite {
                name: "Cr".to_string(),
                reading: MetaboliteReading {
                    concentration: 8.0,
                    sd_percent: 5,
                    ratio: 1.0,
                },
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_pairs_by_id_regardless_of_order() {
        let high = vec![
            record("1", "M", Condition::IsoHigh),
            record("2", "F", Condition::IsoHigh),
        ];
        let low = vec![
            record("2", "F", Condition::IsoLow),
            record("1", "M", Condition::IsoLow),
        ];

        let pairs = pair_records(&high, &low).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].first.id(), "1");
        assert_eq!(pairs[0].second.id(), "1");
        assert_eq!(pairs[1].second.id(), "2");
        assert_eq!(pairs[1].second.condition(), Condition::IsoLow);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let high = vec![
            record("1", "M", Condition::IsoHigh),
            record("2", "F", Condition::IsoHigh),
        ];
        let low = vec![record("1", "M", Condition::IsoLow)];

        let result = pair_records(&high, &low);
        assert!(matches!(
            result,
            Err(Error::ConditionListLength { first: 2, second: 1 })
        ));
    }

    #[test]
    fn test_unpaired_subject_is_error() {
        let high = vec![record("1", "M", Condition::IsoHigh)];
        let low = vec![record("9", "M", Condition::IsoLow)];

        let result = pair_records(&high, &low);
        assert!(matches!(result, Err(Error::UnpairedSubject { .. })));
    }

    #[test]
    fn test_duplicate_subject_is_error() {
        let high = vec![
            record("1", "M", Condition::IsoHigh),
            record("1", "M", Condition::IsoHigh),
        ];
        let low = vec![
            record("1", "M", Condition::IsoLow),
            record("2", "M", Condition::IsoLow),
        ];

        let result = pair_records(&high, &low);
        assert!(matches!(result, Err(Error::DuplicateSubject { .. })));
    }

    #[test]
    fn test_same_condition_lists_are_error() {
        let high = vec![record("1", "M", Condition::IsoHigh)];
        let also_high = vec![record("1", "M", Condition::IsoHigh)];

        let result = pair_records(&high, &also_high);
        assert!(matches!(result, Err(Error::MixedConditions { .. })));
    }

    #[test]
    fn test_mixed_list_is_error() {
        let high = vec![
            record("1", "M", Condition::IsoHigh),
            record("2", "M", Condition::IsoLow),
        ];
        let low = vec![
            record("1", "M", Condition::IsoLow),
            record("2", "M", Condition::IsoLow),
        ];

        let result = pair_records(&high, &low);
        assert!(matches!(result, Err(Error::MixedConditions { .. })));
    }

    #[test]
    fn test_identity_mismatch_is_error() {
        let high = vec![record("1", "M", Condition::IsoHigh)];
        let low = vec![record("1", "F", Condition::IsoLow)];

        let result = pair_records(&high, &low);
        assert!(matches!(result, Err(Error::SubjectMismatch { .. })));
    }

    #[test]
    fn test_empty_lists_pair_to_nothing() {
        let pairs = pair_records(&[], &[]).unwrap();
        assert!(pairs.is_empty());
    }
}
