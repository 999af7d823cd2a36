use std::env::consts;
use std::fmt::Display;
use std::io::{self, Write};

use crate::constants::Device;
use crate::error::AppError;
use crate::report::for_each_instrument;
use crate::source::RawSource;

fn field<W: Write + ?Sized, V: Display>(out: &mut W, key: &str, value: V) -> io::Result<()> {
    writeln!(out, "  {key}: {value}")
}

/// Write the system, file, sample and per-instrument sections
pub fn write_info(source: &mut dyn RawSource, out: &mut dyn Write) -> Result<(), AppError> {
    writeln!(out, "System Information:")?;
    field(out, "OS", consts::OS)?;
    field(out, "Architecture", consts::ARCH)?;
    field(out, "Version", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;

    let header = source.file_header();
    writeln!(out, "File Information:")?;
    field(out, "File Name", source.file_name())?;
    field(out, "Creation Date", &header.creation_date)?;
    field(out, "Last Modified", &header.modified_date)?;
    field(out, "File Revision", header.revision)?;
    field(out, "Description", &header.description)?;
    field(out, "Number of Instruments", source.instrument_count())?;
    field(
        out,
        "Number of MS Instruments",
        source.instrument_count_of_type(Device::MS),
    )?;
    writeln!(out)?;

    let sample = source.sample_info();
    writeln!(out, "Sample Information:")?;
    field(out, "Sample ID", &sample.sample_id)?;
    field(out, "Sample Name", &sample.sample_name)?;
    field(out, "Sample Type", &sample.sample_type)?;
    field(out, "Vial", &sample.vial)?;
    field(out, "Injection Volume", sample.injection_volume)?;
    field(out, "Dilution Factor", sample.dilution_factor)?;
    field(out, "Comment", &sample.comment)?;

    for_each_instrument(source, Device::MS, |source, index, data| {
        let run = source.run_header()?;
        writeln!(out)?;
        writeln!(out, "Instrument {index} Information:")?;
        field(out, "Model", &data.model)?;
        field(out, "Name", &data.name)?;
        field(out, "Serial Number", &data.serial_number)?;
        field(out, "Hardware Version", &data.hardware_version)?;
        field(out, "Software Version", &data.software_version)?;
        field(out, "Mass Resolution", run.mass_resolution)?;
        field(out, "Number of Scans", run.spectra_count)?;
        field(out, "Scan Range", format!("{} - {}", run.first_spectrum, run.last_spectrum))?;
        field(
            out,
            "Time Range",
            format!("{:.2} - {:.2} min", run.start_time, run.end_time),
        )?;
        field(
            out,
            "Mass Range",
            format!("{:.4} - {:.4}", run.low_mass, run.high_mass),
        )?;
        Ok(())
    })
}
