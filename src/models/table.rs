use chrono::NaiveDate;
use serde::Serialize;

/// Date-indexed, country-columned matrix of per-capita rates.
///
/// `dates` are ascending and unique; `rates[row][column]` lines up with
/// `dates[row]` and `countries[column]`. A `None` cell means the case table had
/// no row for that country on that date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerCapitaTable {
    #[serde(serialize_with = "crate::utils::serde_date::serialize_dates")]
    pub dates: Vec<NaiveDate>,
    pub countries: Vec<String>,
    pub rates: Vec<Vec<Option<f64>>>,
}

impl PerCapitaTable {
    pub fn column_index(&self, country: &str) -> Option<usize> {
        self.countries.iter().position(|c| c == country)
    }

    pub fn get(&self, date: NaiveDate, country: &str) -> Option<f64> {
        let column = self.column_index(country)?;
        let row = self.dates.binary_search(&date).ok()?;
        self.rates[row][column]
    }

    /// `(date, rate)` pairs for one column in date order, gaps included.
    pub fn column(&self, column: usize) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.dates
            .iter()
            .zip(self.rates.iter())
            .map(move |(date, row)| (*date, row.get(column).copied().flatten()))
    }
}
