use serde::{Deserialize, Serialize};

use crate::constants::{ActivationType, Device, IonizationMode, MSOrder};
use crate::error::SourceError;

/// Header fields describing the RAW file itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHeader {
    pub creation_date: String,
    pub modified_date: String,
    pub revision: i32,
    pub description: String,
}

/// The sample the RAW file was acquired from, as entered by the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleInfo {
    pub sample_id: String,
    pub sample_name: String,
    pub sample_type: String,
    pub vial: String,
    pub injection_volume: f64,
    pub dilution_factor: f64,
    pub comment: String,
}

/// Identity of the currently selected instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentData {
    pub model: String,
    pub name: String,
    pub serial_number: String,
    pub hardware_version: String,
    /// The instrument firmware/acquisition software version
    pub software_version: String,
}

/// Run-level statistics of the currently selected instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunHeader {
    pub mass_resolution: f64,
    pub spectra_count: i32,
    pub first_spectrum: i32,
    pub last_spectrum: i32,
    /// In minutes
    pub start_time: f64,
    /// In minutes
    pub end_time: f64,
    pub low_mass: f64,
    pub high_mass: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanFilter {
    pub ms_order: MSOrder,
    pub filter_string: Option<String>,
}

/// A single precursor reaction of a scan event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reaction {
    pub precursor_mass: f64,
    pub isolation_width: f64,
    pub isolation_width_offset: f64,
    pub collision_energy: f64,
    pub activation: ActivationType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanEvent {
    pub ms_order: MSOrder,
    pub ionization_mode: IonizationMode,
    pub reactions: Vec<Reaction>,
}

impl ScanEvent {
    pub fn reaction(&self, index: usize) -> Option<&Reaction> {
        self.reactions.get(index)
    }
}

/// One label/value pair from a scan's trailer. Labels keep the vendor's
/// spelling, trailing colon included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerField {
    pub label: String,
    pub value: String,
}

impl TrailerField {
    pub fn new<L: Into<String>, V: Into<String>>(label: L, value: V) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Read access to an opened mass spectrometry data file.
///
/// Per-instrument queries apply to whichever instrument was last chosen with
/// [`RawSource::select_instrument`]. Scan numbers are 1-based.
pub trait RawSource {
    /// The name the source was opened from, used in messages
    fn file_name(&self) -> &str;

    fn is_open(&self) -> bool;

    fn has_error(&self) -> bool;

    /// Whether the file is still being written to by an acquisition
    fn is_being_acquired(&self) -> bool;

    /// A human readable description of the source's error state, if any
    fn status_message(&self) -> Option<String> {
        None
    }

    fn file_header(&self) -> FileHeader;

    fn sample_info(&self) -> SampleInfo;

    /// The number of devices of any kind
    fn instrument_count(&self) -> usize;

    fn instrument_count_of_type(&self, device: Device) -> usize;

    /// Make the instrument `index` of type `device` current. Fails with
    /// [`SourceError::AbsentDevice`] when there is no such device.
    fn select_instrument(&mut self, device: Device, index: usize) -> Result<(), SourceError>;

    fn instrument_data(&self) -> Result<InstrumentData, SourceError>;

    fn run_header(&self) -> Result<RunHeader, SourceError>;

    fn scan_filter(&self, scan_number: i32) -> Result<ScanFilter, SourceError>;

    /// The scan start time, in minutes
    fn retention_time(&self, scan_number: i32) -> Result<f64, SourceError>;

    fn scan_event(&self, scan_number: i32) -> Result<ScanEvent, SourceError>;

    fn trailer_fields(&self, scan_number: i32) -> Result<Vec<TrailerField>, SourceError>;

    /// Release the underlying resources. Calling this more than once is harmless.
    fn close(&mut self);
}
