//! A [`RawSource`] backed by a JSON document describing a RAW file's metadata and scans.
//!
//! Snapshots let the reports run without the vendor runtime, e.g. for fixtures or for
//! sharing the header data of a run without the signal.
use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::Device;
use crate::error::SourceError;
use crate::source::{
    FileHeader, InstrumentData, RawSource, RunHeader, SampleInfo, ScanEvent, ScanFilter,
    TrailerField,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotScan {
    pub scan_number: i32,
    #[serde(default)]
    pub retention_time: f64,
    #[serde(default)]
    pub filter: ScanFilter,
    #[serde(default)]
    pub event: ScanEvent,
    #[serde(default)]
    pub trailer: Vec<TrailerField>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInstrument {
    /// The instrument's number within its device type. Thermo numbers these from 1.
    pub number: usize,
    #[serde(default)]
    pub instrument: InstrumentData,
    #[serde(default)]
    pub run_header: RunHeader,
    #[serde(default)]
    pub scans: Vec<SnapshotScan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub file_header: FileHeader,
    pub sample_info: SampleInfo,
    /// Set when the RAW file was still being written when the snapshot was taken
    pub in_acquisition: bool,
    pub error: Option<String>,
    /// Devices other than mass spectrometers, e.g. UV or analog channels
    pub other_devices: usize,
    pub instruments: Vec<SnapshotInstrument>,
}

#[derive(Debug)]
pub struct SnapshotSource {
    name: String,
    snapshot: Snapshot,
    selected: Option<usize>,
    open: bool,
}

impl SnapshotSource {
    /// Read a snapshot from a JSON file
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let handle = io::BufReader::new(fs::File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(handle)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        debug!(
            "Loaded snapshot of {} with {} instrument(s)",
            path.display(),
            snapshot.instruments.len()
        );
        Ok(Self::new(path.display().to_string(), snapshot))
    }

    pub fn new<S: Into<String>>(name: S, mut snapshot: Snapshot) -> Self {
        for inst in snapshot.instruments.iter_mut() {
            inst.scans.sort_by_key(|s| s.scan_number);
        }
        Self {
            name: name.into(),
            snapshot,
            selected: None,
            open: true,
        }
    }

    fn current(&self) -> Result<&SnapshotInstrument, SourceError> {
        if !self.open {
            return Err(SourceError::fatal(format!("{} is closed", self.name)));
        }
        self.selected
            .and_then(|i| self.snapshot.instruments.get(i))
            .ok_or_else(|| SourceError::fatal("no instrument selected"))
    }

    fn scan(&self, scan_number: i32) -> Result<&SnapshotScan, SourceError> {
        let inst = self.current()?;
        inst.scans
            .binary_search_by_key(&scan_number, |s| s.scan_number)
            .map(|i| &inst.scans[i])
            .map_err(|_| {
                SourceError::fatal(format!(
                    "scan {scan_number} not found for instrument {}",
                    inst.number
                ))
            })
    }
}

impl RawSource for SnapshotSource {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn has_error(&self) -> bool {
        self.snapshot.error.is_some()
    }

    fn is_being_acquired(&self) -> bool {
        self.snapshot.in_acquisition
    }

    fn status_message(&self) -> Option<String> {
        self.snapshot.error.clone()
    }

    fn file_header(&self) -> FileHeader {
        self.snapshot.file_header.clone()
    }

    fn sample_info(&self) -> SampleInfo {
        self.snapshot.sample_info.clone()
    }

    fn instrument_count(&self) -> usize {
        self.snapshot.instruments.len() + self.snapshot.other_devices
    }

    fn instrument_count_of_type(&self, device: Device) -> usize {
        match device {
            Device::MS => self.snapshot.instruments.len(),
            _ => 0,
        }
    }

    fn select_instrument(&mut self, device: Device, index: usize) -> Result<(), SourceError> {
        if !self.open {
            return Err(SourceError::fatal(format!("{} is closed", self.name)));
        }
        if device != Device::MS {
            return Err(SourceError::AbsentDevice { device, index });
        }
        match self
            .snapshot
            .instruments
            .iter()
            .position(|inst| inst.number == index)
        {
            Some(i) => {
                self.selected = Some(i);
                Ok(())
            }
            None => Err(SourceError::AbsentDevice { device, index }),
        }
    }

    fn instrument_data(&self) -> Result<InstrumentData, SourceError> {
        Ok(self.current()?.instrument.clone())
    }

    fn run_header(&self) -> Result<RunHeader, SourceError> {
        Ok(self.current()?.run_header.clone())
    }

    fn scan_filter(&self, scan_number: i32) -> Result<ScanFilter, SourceError> {
        Ok(self.scan(scan_number)?.filter.clone())
    }

    fn retention_time(&self, scan_number: i32) -> Result<f64, SourceError> {
        Ok(self.scan(scan_number)?.retention_time)
    }

    fn scan_event(&self, scan_number: i32) -> Result<ScanEvent, SourceError> {
        Ok(self.scan(scan_number)?.event.clone())
    }

    fn trailer_fields(&self, scan_number: i32) -> Result<Vec<TrailerField>, SourceError> {
        Ok(self.scan(scan_number)?.trailer.clone())
    }

    fn close(&mut self) {
        self.open = false;
        self.selected = None;
    }
}
