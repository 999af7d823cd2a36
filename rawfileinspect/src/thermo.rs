//! A [`RawSource`] over Thermo Fisher's `RawFileReader`, hosted in-process by the
//! [`thermorawfilereader`] crate.
//!
//! That reader exposes the first mass spectrometer only, so this source reports one
//! MS instrument numbered 1, as Thermo's own API numbers it.
//!
//! # Licensing
//! By using this module, you agree to the [RawFileReader License](https://github.com/thermofisherlsms/RawFileReader/blob/main/License.doc)
use std::io;
use std::path::Path;

use log::{debug, warn};
use thermorawfilereader::schema::DissociationMethod;
use thermorawfilereader::{RawFileReader, RawFileReaderError, RawSpectrum};

use crate::constants::{ActivationType, Device, IonizationMode, MSOrder};
use crate::error::SourceError;
use crate::source::{
    FileHeader, InstrumentData, RawSource, Reaction, RunHeader, SampleInfo, ScanEvent, ScanFilter,
    TrailerField,
};

const MS_INSTRUMENT: usize = 1;

pub struct ThermoSource {
    name: String,
    handle: Option<RawFileReader>,
    selected: bool,
}

impl ThermoSource {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let mut handle = RawFileReader::open(path)?;
        handle.set_signal_loading(false);
        debug!("Opened {} with {} spectra", path.display(), handle.len());
        Ok(Self {
            name: path.display().to_string(),
            handle: Some(handle),
            selected: false,
        })
    }

    fn handle(&self) -> Result<&RawFileReader, SourceError> {
        match (&self.handle, self.selected) {
            (Some(handle), true) => Ok(handle),
            (Some(_), false) => Err(SourceError::fatal("no instrument selected")),
            (None, _) => Err(SourceError::fatal(format!("{} is closed", self.name))),
        }
    }

    /// Thermo scan numbers are one greater than the reader's spectrum index
    fn spectrum(&self, scan_number: i32) -> Result<RawSpectrum, SourceError> {
        let handle = self.handle()?;
        usize::try_from(scan_number - 1)
            .ok()
            .and_then(|index| handle.get(index))
            .ok_or_else(|| SourceError::fatal(format!("scan {scan_number} not found")))
    }
}

/// Supplemental activation is dropped, the primary method is reported
fn activation_type(method: DissociationMethod) -> ActivationType {
    match method {
        DissociationMethod::CID => ActivationType::CollisionInducedDissociation,
        DissociationMethod::HCD => ActivationType::HigherEnergyCollisionalDissociation,
        DissociationMethod::ECD | DissociationMethod::ECCID | DissociationMethod::ECHCD => {
            ActivationType::ElectronCaptureDissociation
        }
        DissociationMethod::ETD | DissociationMethod::ETCID | DissociationMethod::ETHCD => {
            ActivationType::ElectronTransferDissociation
        }
        DissociationMethod::NETD => ActivationType::NegativeElectronTransferDissociation,
        DissociationMethod::MPD => ActivationType::MultiPhotonDissociation,
        DissociationMethod::PTD => ActivationType::ProtonTransferReaction,
        _ => ActivationType::Any,
    }
}

impl RawSource for ThermoSource {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn has_error(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|h| h.status() != RawFileReaderError::Ok)
    }

    fn is_being_acquired(&self) -> bool {
        // The hosted reader only opens files whose acquisition has finished
        false
    }

    fn status_message(&self) -> Option<String> {
        self.handle.as_ref().map(|h| h.status().to_string())
    }

    fn file_header(&self) -> FileHeader {
        let mut header = FileHeader::default();
        if let Some(handle) = self.handle.as_ref() {
            let descr = handle.file_description();
            header.creation_date = descr.creation_date().unwrap_or_default().to_string();
        }
        header
    }

    fn sample_info(&self) -> SampleInfo {
        let mut sample = SampleInfo::default();
        if let Some(handle) = self.handle.as_ref() {
            let descr = handle.file_description();
            sample.sample_id = descr.sample_id().unwrap_or_default().to_string();
        }
        sample
    }

    fn instrument_count(&self) -> usize {
        self.instrument_count_of_type(Device::MS)
    }

    fn instrument_count_of_type(&self, device: Device) -> usize {
        match (device, &self.handle) {
            (Device::MS, Some(_)) => 1,
            _ => 0,
        }
    }

    fn select_instrument(&mut self, device: Device, index: usize) -> Result<(), SourceError> {
        if self.handle.is_none() {
            return Err(SourceError::fatal(format!("{} is closed", self.name)));
        }
        if device != Device::MS || index != MS_INSTRUMENT {
            return Err(SourceError::AbsentDevice { device, index });
        }
        self.selected = true;
        Ok(())
    }

    fn instrument_data(&self) -> Result<InstrumentData, SourceError> {
        let model = self.handle()?.instrument_model();
        Ok(InstrumentData {
            model: model.model().unwrap_or_default().to_string(),
            name: model.name().unwrap_or_default().to_string(),
            serial_number: model.serial_number().unwrap_or_default().to_string(),
            hardware_version: model.hardware_version().unwrap_or_default().to_string(),
            software_version: model.software_version().unwrap_or_default().to_string(),
        })
    }

    fn run_header(&self) -> Result<RunHeader, SourceError> {
        let handle = self.handle()?;
        let mut header = RunHeader {
            spectra_count: handle.len() as i32,
            first_spectrum: handle.first_spectrum(),
            last_spectrum: handle.last_spectrum(),
            ..Default::default()
        };
        if let Ok(first) = self.spectrum(header.first_spectrum) {
            header.start_time = first.time();
            if let Some(acq) = first.acquisition() {
                header.low_mass = acq.low_mz();
                header.high_mass = acq.high_mz();
            }
        }
        if let Ok(last) = self.spectrum(header.last_spectrum) {
            header.end_time = last.time();
        }
        Ok(header)
    }

    fn scan_filter(&self, scan_number: i32) -> Result<ScanFilter, SourceError> {
        let spectrum = self.spectrum(scan_number)?;
        Ok(ScanFilter {
            ms_order: MSOrder::from(spectrum.ms_level() as i16),
            filter_string: spectrum.filter_string().map(|s| s.to_string()),
        })
    }

    fn retention_time(&self, scan_number: i32) -> Result<f64, SourceError> {
        Ok(self.spectrum(scan_number)?.time())
    }

    fn scan_event(&self, scan_number: i32) -> Result<ScanEvent, SourceError> {
        let spectrum = self.spectrum(scan_number)?;
        let mut event = ScanEvent {
            ms_order: MSOrder::from(spectrum.ms_level() as i16),
            ..Default::default()
        };
        if let Some(acq) = spectrum.acquisition() {
            event.ionization_mode = IonizationMode::from(acq.ionization_mode().0);
        }
        if let Some(prec) = spectrum.precursor() {
            let window = prec.isolation_window();
            let activation = prec.activation();
            let width = window.upper() - window.lower();
            event.reactions.push(Reaction {
                precursor_mass: prec.mz(),
                isolation_width: width,
                isolation_width_offset: window.target() - (window.lower() + width / 2.0),
                collision_energy: activation.collision_energy(),
                activation: activation_type(activation.dissociation_method()),
            });
        }
        Ok(event)
    }

    fn trailer_fields(&self, scan_number: i32) -> Result<Vec<TrailerField>, SourceError> {
        let handle = self.handle()?;
        let index = usize::try_from(scan_number - 1)
            .map_err(|_| SourceError::fatal(format!("scan {scan_number} not found")))?;
        match handle.get_raw_trailers_for(index) {
            Some(trailers) => Ok(trailers
                .iter()
                .map(|t| TrailerField::new(t.label.to_string(), t.value.to_string()))
                .collect()),
            None => {
                warn!("No trailer found for scan {scan_number}");
                Ok(Vec::new())
            }
        }
    }

    fn close(&mut self) {
        // Dropping the reader releases it in the dotnet runtime
        if self.handle.take().is_some() {
            debug!("Released {}", self.name);
        }
        self.selected = false;
    }
}
