//! Cartesian expansion of the month and practice axes.

use crate::models::{OutputRow, ZoneRecord};

/// Expand one record into its (month × practice) output rows.
///
/// An empty axis is treated as a singleton holding the empty string, so a
/// record with no months or no practices still yields one row. Months are
/// the outer axis; all rows for a record are contiguous and share its id.
pub fn expand(record: &ZoneRecord) -> Vec<OutputRow> {
    let months = axis(&record.months);
    let practices = axis(&record.practices);

    let mut rows = Vec::with_capacity(months.len() * practices.len());
    for month in months {
        for practice in practices.iter() {
            rows.push(OutputRow {
                create_datetime: record.create_datetime.clone(),
                id: record.id,
                description: record.description.clone(),
                name: record.name.clone(),
                structure: record.structure.clone(),
                species_id: record.species_id.clone(),
                practices: practice.clone(),
                months: month.clone(),
                region: record.region.clone(),
                departement: record.departement.clone(),
                country: record.country.clone(),
                update_datetime: record.update_datetime.clone(),
            });
        }
    }
    rows
}

fn axis(values: &[String]) -> Vec<String> {
    if values.is_empty() {
        vec![String::new()]
    } else {
        values.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(months: &[&str], practices: &[&str]) -> ZoneRecord {
        ZoneRecord {
            id: 42,
            description: "desc".to_string(),
            name: "zone".to_string(),
            structure: "parc".to_string(),
            species_id: "zr".to_string(),
            practices: practices.iter().map(|s| s.to_string()).collect(),
            coordinates: (5.0, 45.0),
            months: months.iter().map(|s| s.to_string()).collect(),
            region: "region".to_string(),
            departement: "dep".to_string(),
            country: "France".to_string(),
            create_datetime: "2024-01-01".to_string(),
            update_datetime: "2024-01-02".to_string(),
        }
    }

    #[test]
    fn full_cartesian_product() {
        let rows = expand(&record(&["janvier", "decembre"], &["ski", "rando"]));
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.id == 42));

        let combos: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.months.as_str(), r.practices.as_str()))
            .collect();
        assert_eq!(
            combos,
            vec![
                ("janvier", "ski"),
                ("janvier", "rando"),
                ("decembre", "ski"),
                ("decembre", "rando"),
            ]
        );
    }

    #[test]
    fn empty_months_still_yields_rows() {
        let rows = expand(&record(&[], &["ski"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].months, "");
        assert_eq!(rows[0].practices, "ski");
    }

    #[test]
    fn empty_practices_still_yields_rows() {
        let rows = expand(&record(&["mai"], &[]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].practices, "");
        assert_eq!(rows[0].months, "mai");
    }

    #[test]
    fn both_axes_empty_yields_single_row() {
        let rows = expand(&record(&[], &[]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 42);
    }
}
