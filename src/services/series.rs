use crate::models::chart::CountrySeries;
use crate::models::table::PerCapitaTable;
use chrono::NaiveDate;

/// Milliseconds since the Unix epoch at 00:00 UTC of `date`.
pub fn timestamp_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// One series per table column, points in ascending date order. Empty cells
/// are skipped rather than charted as zero.
pub fn assemble(table: &PerCapitaTable) -> Vec<CountrySeries> {
    table
        .countries
        .iter()
        .enumerate()
        .map(|(column, country)| CountrySeries {
            country: country.clone(),
            series: table
                .column(column)
                .filter_map(|(date, rate)| rate.map(|rate| (timestamp_millis(date), rate)))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    #[test]
    fn midnight_utc_timestamps() {
        assert_eq!(timestamp_millis(date(22)), 1_579_651_200_000);
        assert_eq!(
            timestamp_millis(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
            0
        );
    }

    #[test]
    fn one_series_per_column_with_gaps_skipped() {
        let table = PerCapitaTable {
            dates: vec![date(22), date(23), date(24)],
            countries: vec!["Germany".to_string(), "France".to_string()],
            rates: vec![
                vec![Some(0.1), None],
                vec![None, Some(0.5)],
                vec![Some(0.3), Some(0.7)],
            ],
        };

        let series = assemble(&table);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].country, "Germany");
        assert_eq!(
            series[0].series,
            vec![(timestamp_millis(date(22)), 0.1), (timestamp_millis(date(24)), 0.3)]
        );
        assert_eq!(series[1].series.len(), 2);

        for entry in &series {
            assert!(entry.series.windows(2).all(|w| w[0].0 < w[1].0));
        }
    }
}
