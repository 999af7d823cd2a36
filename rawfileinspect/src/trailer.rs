//! Lookups into a scan's trailer, the label/value pairs stored beside each spectrum.
use std::str::FromStr;

use log::warn;

use crate::source::TrailerField;

pub const MONOISOTOPIC_MZ_LABEL: &str = "Monoisotopic M/Z:";

/// Different instrument firmwares spell the master scan label differently
pub const MASTER_SCAN_LABELS: [&str; 3] =
    ["Master Scan Number:", "Master Scan Number", "Master Index:"];

/// Find the value of the last field whose label exactly matches one of `labels`
pub fn find_value<'a>(fields: &'a [TrailerField], labels: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .rev()
        .find(|f| labels.contains(&f.label.as_str()))
        .map(|f| f.value.as_str())
}

/// Find and parse a trailer value. A value that does not parse is treated as absent.
pub fn parse_value<T: FromStr>(fields: &[TrailerField], labels: &[&str]) -> Option<T> {
    let raw = find_value(fields, labels)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Could not parse trailer value {raw:?} for {labels:?}");
            None
        }
    }
}

/// The trailer values the isolation report consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailerExtras {
    pub monoisotopic_mz: f64,
    pub master_scan: i32,
}

impl Default for TrailerExtras {
    fn default() -> Self {
        Self {
            monoisotopic_mz: 0.0,
            master_scan: 0,
        }
    }
}

impl TrailerExtras {
    pub fn from_fields(fields: &[TrailerField]) -> Self {
        let defaults = Self::default();
        Self {
            monoisotopic_mz: parse_value(fields, &[MONOISOTOPIC_MZ_LABEL])
                .unwrap_or(defaults.monoisotopic_mz),
            master_scan: parse_value(fields, &MASTER_SCAN_LABELS).unwrap_or(defaults.master_scan),
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_monoisotopic_without_master() {
        let fields = vec![
            TrailerField::new("Charge State:", "2"),
            TrailerField::new("Monoisotopic M/Z:", "456.789"),
        ];
        let extras = TrailerExtras::from_fields(&fields);
        assert_eq!(extras.monoisotopic_mz, 456.789);
        assert_eq!(extras.master_scan, 0);
    }

    #[test]
    fn test_master_scan_spellings() {
        for label in MASTER_SCAN_LABELS {
            let fields = vec![TrailerField::new(label, " 1201 ")];
            assert_eq!(TrailerExtras::from_fields(&fields).master_scan, 1201);
        }
    }

    #[test]
    fn test_exact_label_match_only() {
        let fields = vec![
            TrailerField::new("Monoisotopic M/Z", "456.789"),
            TrailerField::new("master scan number:", "3"),
        ];
        assert_eq!(TrailerExtras::from_fields(&fields), TrailerExtras::default());
    }

    #[test]
    fn test_unparseable_value_defaults() {
        let fields = vec![TrailerField::new("Monoisotopic M/Z:", "n/a")];
        assert_eq!(TrailerExtras::from_fields(&fields).monoisotopic_mz, 0.0);
    }

    #[test]
    fn test_last_match_wins() {
        let fields = vec![
            TrailerField::new("Master Index:", "4"),
            TrailerField::new("Master Scan Number:", "9"),
        ];
        assert_eq!(find_value(&fields, &MASTER_SCAN_LABELS), Some("9"));
    }
}
