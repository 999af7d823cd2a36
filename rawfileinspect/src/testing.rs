//! A [`RawSource`] that records how it was used, for tests.
use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::Device;
use crate::error::SourceError;
use crate::snapshot::{Snapshot, SnapshotInstrument, SnapshotScan, SnapshotSource};
use crate::source::{
    FileHeader, InstrumentData, RawSource, Reaction, RunHeader, SampleInfo, ScanEvent, ScanFilter,
    TrailerField,
};
use crate::constants::{ActivationType, MSOrder};

#[derive(Debug, Default)]
pub struct Calls {
    pub closes: usize,
    pub selected: Vec<usize>,
}

pub struct RecordingSource {
    inner: SnapshotSource,
    calls: Rc<RefCell<Calls>>,
    fail_on_scan: Option<i32>,
}

impl RecordingSource {
    pub fn new(snapshot: Snapshot) -> (Self, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let this = Self {
            inner: SnapshotSource::new("recording.raw", snapshot),
            calls: calls.clone(),
            fail_on_scan: None,
        };
        (this, calls)
    }

    /// Make every query about `scan_number` fail with a fatal error
    pub fn failing_on(mut self, scan_number: i32) -> Self {
        self.fail_on_scan = Some(scan_number);
        self
    }

    pub fn inner_mut(&mut self) -> &mut SnapshotSource {
        &mut self.inner
    }

    fn check(&self, scan_number: i32) -> Result<(), SourceError> {
        if self.fail_on_scan == Some(scan_number) {
            Err(SourceError::fatal(format!("injected failure at scan {scan_number}")))
        } else {
            Ok(())
        }
    }
}

impl RawSource for RecordingSource {
    fn file_name(&self) -> &str {
        self.inner.file_name()
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn has_error(&self) -> bool {
        self.inner.has_error()
    }

    fn is_being_acquired(&self) -> bool {
        self.inner.is_being_acquired()
    }

    fn status_message(&self) -> Option<String> {
        self.inner.status_message()
    }

    fn file_header(&self) -> FileHeader {
        self.inner.file_header()
    }

    fn sample_info(&self) -> SampleInfo {
        self.inner.sample_info()
    }

    fn instrument_count(&self) -> usize {
        self.inner.instrument_count()
    }

    fn instrument_count_of_type(&self, device: Device) -> usize {
        self.inner.instrument_count_of_type(device)
    }

    fn select_instrument(&mut self, device: Device, index: usize) -> Result<(), SourceError> {
        self.calls.borrow_mut().selected.push(index);
        self.inner.select_instrument(device, index)
    }

    fn instrument_data(&self) -> Result<InstrumentData, SourceError> {
        self.inner.instrument_data()
    }

    fn run_header(&self) -> Result<RunHeader, SourceError> {
        self.inner.run_header()
    }

    fn scan_filter(&self, scan_number: i32) -> Result<ScanFilter, SourceError> {
        self.check(scan_number)?;
        self.inner.scan_filter(scan_number)
    }

    fn retention_time(&self, scan_number: i32) -> Result<f64, SourceError> {
        self.check(scan_number)?;
        self.inner.retention_time(scan_number)
    }

    fn scan_event(&self, scan_number: i32) -> Result<ScanEvent, SourceError> {
        self.check(scan_number)?;
        self.inner.scan_event(scan_number)
    }

    fn trailer_fields(&self, scan_number: i32) -> Result<Vec<TrailerField>, SourceError> {
        self.check(scan_number)?;
        self.inner.trailer_fields(scan_number)
    }

    fn close(&mut self) {
        self.calls.borrow_mut().closes += 1;
        self.inner.close()
    }
}

/// An MS1 scan with no reactions
pub fn ms1_scan(scan_number: i32) -> SnapshotScan {
    SnapshotScan {
        scan_number,
        retention_time: scan_number as f64 * 0.01,
        filter: ScanFilter {
            ms_order: MSOrder::MS,
            filter_string: None,
        },
        event: ScanEvent {
            ms_order: MSOrder::MS,
            ..Default::default()
        },
        trailer: Vec::new(),
    }
}

/// An HCD MS2 scan isolating `precursor_mass`
pub fn ms2_scan(scan_number: i32, precursor_mass: f64) -> SnapshotScan {
    SnapshotScan {
        scan_number,
        retention_time: scan_number as f64 * 0.01,
        filter: ScanFilter {
            ms_order: MSOrder::MS2,
            filter_string: None,
        },
        event: ScanEvent {
            ms_order: MSOrder::MS2,
            reactions: vec![Reaction {
                precursor_mass,
                isolation_width: 1.6,
                isolation_width_offset: 0.0,
                collision_energy: 30.0,
                activation: ActivationType::HigherEnergyCollisionalDissociation,
            }],
            ..Default::default()
        },
        trailer: Vec::new(),
    }
}

/// An instrument numbered `number` holding `scans`, with bounds spanning `first..=last`
pub fn instrument(
    number: usize,
    first: i32,
    last: i32,
    scans: Vec<SnapshotScan>,
) -> SnapshotInstrument {
    SnapshotInstrument {
        number,
        instrument: InstrumentData {
            model: "Orbitrap Exploris 480".into(),
            serial_number: format!("SN{number:04}"),
            ..Default::default()
        },
        run_header: RunHeader {
            spectra_count: last - first + 1,
            first_spectrum: first,
            last_spectrum: last,
            ..Default::default()
        },
        scans,
    }
}
