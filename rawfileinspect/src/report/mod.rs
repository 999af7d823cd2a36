//! Text reports generated from an opened [`RawSource`].
mod info;
mod isolation;

pub use info::write_info;
pub use isolation::{IsolationOptions, IsolationRecord, ISOLATION_HEADER, write_isolation};

use log::debug;

use crate::constants::Device;
use crate::error::{AppError, SourceError};
use crate::source::{InstrumentData, RawSource};

/// Visit every instrument of type `device`, selecting each in turn before calling `f`.
///
/// Indices `0..=N` are probed where `N` is the number of such instruments. The vendor
/// numbers instruments from 1, so at least one probe normally finds no device; absent
/// devices are skipped, any other failure stops the walk.
pub fn for_each_instrument<F>(
    source: &mut dyn RawSource,
    device: Device,
    mut f: F,
) -> Result<(), AppError>
where
    F: FnMut(&mut dyn RawSource, usize, &InstrumentData) -> Result<(), AppError>,
{
    let count = source.instrument_count_of_type(device);
    for index in 0..=count {
        let selected = source
            .select_instrument(device, index)
            .and_then(|_| source.instrument_data());
        let data = match selected {
            Ok(data) => data,
            Err(SourceError::AbsentDevice { .. }) => {
                debug!("No {device} instrument at index {index}, skipping");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        f(&mut *source, index, &data)?;
    }
    Ok(())
}
