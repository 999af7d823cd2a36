//! Print structured reports from Thermo RAW files: file, sample and instrument metadata,
//! and the isolation and precursor details of every MS2 scan.
//!
//! Data access goes through the [`RawSource`] trait. [`SnapshotSource`] reads a JSON
//! snapshot of a run, and with the `thermo` feature enabled, `ThermoSource` reads RAW
//! files through Thermo Fisher's `RawFileReader` library hosted in a `dotnet` runtime.
//!
//! The main access point is [`dispatch`], fed a [`Config`] and a way to open files,
//! normally [`open_path`].
//!
//! # Licensing
//! Reading RAW files with the `thermo` feature means agreeing to the [RawFileReader License](https://github.com/thermofisherlsms/RawFileReader/blob/main/License.doc)
pub mod cli;
mod constants;
mod dispatch;
mod error;
mod guard;
mod open;
pub mod report;
mod scan_range;
mod snapshot;
mod source;
#[cfg(feature = "thermo")]
mod thermo;
mod trailer;
mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::constants::{ActivationType, Device, IonizationMode, MSOrder};
pub use crate::dispatch::{COMMANDS, Command, CommandSpec, Config, dispatch, find_command};
pub use crate::error::{AppError, SourceCondition, SourceError, ValidationError};
pub use crate::guard::SourceGuard;
pub use crate::open::{SourceFormat, infer_from_path, open_path};
pub use crate::scan_range::{InstrumentBounds, ResolvedRange, ScanRange};
pub use crate::snapshot::{Snapshot, SnapshotInstrument, SnapshotScan, SnapshotSource};
pub use crate::source::{
    FileHeader, InstrumentData, RawSource, Reaction, RunHeader, SampleInfo, ScanEvent, ScanFilter,
    TrailerField,
};
#[cfg(feature = "thermo")]
pub use crate::thermo::ThermoSource;
pub use crate::trailer::{MASTER_SCAN_LABELS, MONOISOTOPIC_MZ_LABEL, TrailerExtras, find_value};
pub use crate::validate::{validate_file, validate_scan_range};
