//! Station and period metadata encoded in DWD archive file names.

use agrorisk_frame::StationId;
use chrono::{Datelike, NaiveDate};

/// Metadata parsed from an archive or product file name such as
/// `stundenwerte_TF_02947_20061001_20211231_hist.zip` or
/// `produkt_tu_stunde_19500101_20211231_00044.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    /// Station the file belongs to.
    pub station: StationId,
    /// First day covered.
    pub first: NaiveDate,
    /// Last day covered.
    pub last: NaiveDate,
}

impl ArchiveName {
    /// Parses a file name (a path is accepted; only the last component is
    /// used). Returns `None` unless the name carries a five-digit station
    /// token and two `YYYYMMDD` date tokens.
    pub fn parse(name: &str) -> Option<Self> {
        let file = name.rsplit(['/', '\\']).next()?;
        let stem = file.split('.').next()?;
        let tokens: Vec<&str> = stem.split('_').collect();

        let station = tokens
            .iter()
            .find(|t| t.len() == 5 && all_digits(t))
            .and_then(|t| StationId::new(t).ok())?;
        let mut dates = tokens
            .iter()
            .filter(|t| t.len() == 8 && all_digits(t))
            .filter_map(|t| NaiveDate::parse_from_str(t, "%Y%m%d").ok());
        let first = dates.next()?;
        let last = dates.next()?;
        Some(Self {
            station,
            first,
            last,
        })
    }

    /// First calendar year covered.
    pub fn first_year(&self) -> i32 {
        self.first.year()
    }

    /// Last calendar year covered.
    pub fn last_year(&self) -> i32 {
        self.last.year()
    }

    /// Returns `true` if the file spans every year of `start..=end`.
    pub fn covers(&self, start: i32, end: i32) -> bool {
        self.first_year() <= start && end <= self.last_year()
    }

    /// Returns `true` if the file has at least one year in `start..=end`.
    pub fn overlaps(&self, start: i32, end: i32) -> bool {
        self.first_year() <= end && start <= self.last_year()
    }
}

fn all_digits(token: &str) -> bool {
    token.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_archive_name() {
        let a = ArchiveName::parse("stundenwerte_TF_02947_20061001_20211231_hist.zip").unwrap();
        assert_eq!(a.station.as_str(), "02947");
        assert_eq!(a.first_year(), 2006);
        assert_eq!(a.last_year(), 2021);
        assert_eq!(a.first, NaiveDate::from_ymd_opt(2006, 10, 1).unwrap());
    }

    #[test]
    fn parses_product_name_with_path() {
        let a = ArchiveName::parse("data/hourly/produkt_tu_stunde_19500101_20211231_00044.txt")
            .unwrap();
        assert_eq!(a.station.as_str(), "00044");
        assert_eq!((a.first_year(), a.last_year()), (1950, 2021));
    }

    #[test]
    fn rejects_names_without_period_or_station() {
        assert_eq!(ArchiveName::parse("stundenwerte_TU_00044_akt.zip"), None);
        assert_eq!(ArchiveName::parse("Metadaten_Geographie.txt"), None);
        assert_eq!(ArchiveName::parse("produkt_19500101_20211231.txt"), None);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(
            ArchiveName::parse("stundenwerte_TF_02947_20061301_20211231_hist.zip"),
            None
        );
    }

    #[test]
    fn covers_requires_full_span() {
        let a = ArchiveName::parse("stundenwerte_TU_00044_19500101_20211231_hist.zip").unwrap();
        assert!(a.covers(1950, 2021));
        assert!(a.covers(1960, 2000));
        assert!(!a.covers(1949, 2000));
        assert!(!a.covers(1960, 2022));
        assert!(a.overlaps(2020, 2023));
        assert!(!a.overlaps(2022, 2023));
    }
}
