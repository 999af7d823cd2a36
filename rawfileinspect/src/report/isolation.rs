use std::io::{self, Write};

use log::{debug, info};

use crate::constants::{ActivationType, Device, IonizationMode, MSOrder};
use crate::error::{AppError, SourceError};
use crate::report::for_each_instrument;
use crate::scan_range::{InstrumentBounds, ScanRange};
use crate::source::RawSource;
use crate::trailer::TrailerExtras;

pub const ISOLATION_HEADER: &str = "InstrumentId,ScanNumber,MSOrder,RetentionTime,PrecursorMass,IsolationWidth,IsolationWidthOffset,MonoisotopicMZ,ActivationType,CollisionEnergy";

const MASTER_SCAN_COLUMNS: &str = ",MasterScanNumber,IonizationMode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsolationOptions {
    pub range: ScanRange,
    /// Append the master scan number and ionization mode to each row
    pub master_scan: bool,
}

/// The isolation and precursor details of one MS2 scan
#[derive(Debug, Clone, PartialEq)]
pub struct IsolationRecord {
    pub instrument_id: usize,
    pub scan_number: i32,
    pub ms_order: MSOrder,
    pub retention_time: f64,
    pub precursor_mass: f64,
    pub isolation_width: f64,
    pub isolation_width_offset: f64,
    pub monoisotopic_mz: f64,
    pub activation: ActivationType,
    pub collision_energy: f64,
    pub ionization_mode: IonizationMode,
    pub master_scan: i32,
}

impl IsolationRecord {
    /// Read the record for `scan_number` from the selected instrument, or `None` when
    /// the scan is not MS2.
    pub fn read(
        source: &dyn RawSource,
        instrument_id: usize,
        scan_number: i32,
    ) -> Result<Option<Self>, SourceError> {
        let filter = source.scan_filter(scan_number)?;
        if filter.ms_order != MSOrder::MS2 {
            return Ok(None);
        }

        let retention_time = source.retention_time(scan_number)?;
        let event = source.scan_event(scan_number)?;
        let reaction = event.reaction(0).ok_or_else(|| {
            SourceError::fatal(format!("MS2 scan {scan_number} has no precursor reaction"))
        })?;
        let extras = TrailerExtras::from_fields(&source.trailer_fields(scan_number)?);

        Ok(Some(Self {
            instrument_id,
            scan_number,
            ms_order: filter.ms_order,
            retention_time,
            precursor_mass: reaction.precursor_mass,
            isolation_width: reaction.isolation_width,
            isolation_width_offset: reaction.isolation_width_offset,
            monoisotopic_mz: extras.monoisotopic_mz,
            activation: reaction.activation,
            collision_energy: reaction.collision_energy,
            ionization_mode: event.ionization_mode,
            master_scan: extras.master_scan,
        }))
    }

    pub fn write_row<W: Write + ?Sized>(&self, out: &mut W, master_scan: bool) -> io::Result<()> {
        write!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            self.instrument_id,
            self.scan_number,
            self.ms_order,
            self.retention_time,
            self.precursor_mass,
            self.isolation_width,
            self.isolation_width_offset,
            self.monoisotopic_mz,
            self.activation,
            self.collision_energy,
        )?;
        if master_scan {
            write!(out, ",{},{}", self.master_scan, self.ionization_mode)?;
        }
        writeln!(out)
    }
}

/// Write one header line per MS instrument followed by a row for every MS2 scan in
/// `options.range`
pub fn write_isolation(
    source: &mut dyn RawSource,
    options: &IsolationOptions,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    for_each_instrument(source, Device::MS, |source, instrument_id, _| {
        let header = source.run_header()?;
        let range = options.range.resolve(InstrumentBounds::from(&header));
        debug!(
            "Instrument {instrument_id}: scans {}-{}, reading {}-{}",
            header.first_spectrum, header.last_spectrum, range.lo, range.hi
        );

        write!(out, "{ISOLATION_HEADER}")?;
        if options.master_scan {
            write!(out, "{MASTER_SCAN_COLUMNS}")?;
        }
        writeln!(out)?;

        let mut n_rows = 0usize;
        for scan_number in range.scans() {
            if let Some(record) = IsolationRecord::read(source, instrument_id, scan_number)? {
                record.write_row(&mut *out, options.master_scan)?;
                n_rows += 1;
            }
        }
        info!("Instrument {instrument_id}: {n_rows} MS2 scan(s) reported");
        Ok(())
    })
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::snapshot::Snapshot;
    use crate::source::TrailerField;
    use crate::testing::{RecordingSource, instrument, ms1_scan, ms2_scan};

    fn run(source: &mut dyn RawSource, options: IsolationOptions) -> Result<String, AppError> {
        let mut buf = Vec::new();
        write_isolation(source, &options, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn alternating(first: i32, last: i32) -> Vec<crate::snapshot::SnapshotScan> {
        (first..=last)
            .map(|i| if i % 2 == 0 { ms2_scan(i, 400.0 + i as f64) } else { ms1_scan(i) })
            .collect()
    }

    #[test]
    fn test_one_row_per_ms2_scan() -> Result<(), AppError> {
        let snapshot = Snapshot {
            instruments: vec![instrument(1, 1, 6, alternating(1, 6))],
            ..Default::default()
        };
        let (mut source, _) = RecordingSource::new(snapshot);
        let text = run(&mut source, IsolationOptions::default())?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ISOLATION_HEADER);
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            "1,2,Ms2,0.02,402,1.6,0,0,HigherEnergyCollisionalDissociation,30"
        );
        assert!(lines[2].starts_with("1,4,Ms2,"));
        assert!(lines[3].starts_with("1,6,Ms2,"));
        Ok(())
    }

    #[test]
    fn test_ms3_scans_are_skipped() -> Result<(), AppError> {
        let mut ms3 = ms2_scan(3, 250.5);
        ms3.filter.ms_order = MSOrder::MS3;
        ms3.event.ms_order = MSOrder::MS3;
        let snapshot = Snapshot {
            instruments: vec![instrument(1, 1, 3, vec![ms1_scan(1), ms2_scan(2, 500.0), ms3])],
            ..Default::default()
        };
        let (mut source, _) = RecordingSource::new(snapshot);
        let text = run(&mut source, IsolationOptions::default())?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("1,2,Ms2,"));
        assert!(!text.contains("Ms3"));
        Ok(())
    }

    #[test]
    fn test_header_per_instrument() -> Result<(), AppError> {
        let snapshot = Snapshot {
            instruments: vec![
                instrument(1, 1, 2, alternating(1, 2)),
                instrument(2, 1, 2, alternating(1, 2)),
            ],
            ..Default::default()
        };
        let (mut source, _) = RecordingSource::new(snapshot);
        let text = run(&mut source, IsolationOptions::default())?;
        let headers = text.lines().filter(|l| *l == ISOLATION_HEADER).count();
        assert_eq!(headers, 2);
        assert!(text.contains("\n2,2,Ms2,"));
        Ok(())
    }

    #[test]
    fn test_range_is_clipped() -> Result<(), AppError> {
        let snapshot = Snapshot {
            instruments: vec![instrument(1, 1, 6, alternating(1, 6))],
            ..Default::default()
        };
        let (mut source, _) = RecordingSource::new(snapshot);
        let options = IsolationOptions {
            range: ScanRange::Between(3, 50),
            ..Default::default()
        };
        let text = run(&mut source, options)?;
        let scans: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(scans, vec!["4", "6"]);
        Ok(())
    }

    #[test]
    fn test_trailer_values() -> Result<(), AppError> {
        let mut scan = ms2_scan(2, 456.8);
        scan.trailer = vec![
            TrailerField::new("Monoisotopic M/Z:", "456.789"),
            TrailerField::new("Master Index:", "1"),
        ];
        let snapshot = Snapshot {
            instruments: vec![instrument(1, 1, 2, vec![ms1_scan(1), scan])],
            ..Default::default()
        };
        let (mut source, _) = RecordingSource::new(snapshot);
        let options = IsolationOptions {
            range: ScanRange::Single(2),
            master_scan: true,
        };
        let text = run(&mut source, options)?;
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with(",MasterScanNumber,IonizationMode"));
        assert_eq!(
            lines[1],
            "1,2,Ms2,0.02,456.8,1.6,0,456.789,HigherEnergyCollisionalDissociation,30,1,Any"
        );
        Ok(())
    }

    #[test]
    fn test_ms2_without_reaction_is_fatal() {
        let mut scan = ms2_scan(1, 300.0);
        scan.event.reactions.clear();
        let snapshot = Snapshot {
            instruments: vec![instrument(1, 1, 1, vec![scan])],
            ..Default::default()
        };
        let (mut source, _) = RecordingSource::new(snapshot);
        let result = run(&mut source, IsolationOptions::default());
        assert!(matches!(result, Err(AppError::Processing(_))));
    }
}
