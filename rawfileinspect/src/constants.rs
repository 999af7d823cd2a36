use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The kinds of devices a RAW file may hold data for, mirroring Thermo's `Device` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Device {
    None = -1,
    MS = 0,
    MSAnalog = 1,
    Analog = 2,
    UV = 3,
    Pda = 4,
    Other = 5,
}

impl From<i8> for Device {
    fn from(value: i8) -> Self {
        match value {
            0 => Self::MS,
            1 => Self::MSAnalog,
            2 => Self::Analog,
            3 => Self::UV,
            4 => Self::Pda,
            5 => Self::Other,
            _ => Self::None,
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// This enum mirrors the different types of ionization modes covered in Thermo's RawFileReader library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum IonizationMode
{
    ElectronImpact = 0,
    ChemicalIonization = 1,
    FastAtomBombardment = 2,
    ElectroSpray = 3,
    AtmosphericPressureChemicalIonization = 4,
    NanoSpray = 5,
    ThermoSpray = 6,
    FieldDesorption = 7,
    MatrixAssistedLaserDesorptionIonization = 8,
    GlowDischarge = 9,
    #[default]
    Any = 10,
    PaperSprayIonization = 11,
    CardNanoSprayIonization = 12,
    IonModeBeyondKnown = 22,
}

impl From<u8> for IonizationMode {
    fn from(value: u8) -> Self {
        match value {
             0 => Self::ElectronImpact,
             1 => Self::ChemicalIonization,
             2 => Self::FastAtomBombardment,
             3 => Self::ElectroSpray,
             4 => Self::AtmosphericPressureChemicalIonization,
             5 => Self::NanoSpray,
             6 => Self::ThermoSpray,
             7 => Self::FieldDesorption,
             8 => Self::MatrixAssistedLaserDesorptionIonization,
             9 => Self::GlowDischarge,
             10 => Self::Any,
             11 => Self::PaperSprayIonization,
             12 => Self::CardNanoSprayIonization,
             _ => Self::IonModeBeyondKnown
        }
    }
}

impl Display for IonizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The scan's MS exponentiation level as classified by its scan filter.
///
/// Displays using Thermo's own spelling, e.g. `Ms2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum MSOrder {
    NeutralGain = -3,
    NeutralLoss = -2,
    ParentScan = -1,
    Any = 0,
    MS = 1,
    MS2 = 2,
    MS3 = 3,
    MS4 = 4,
    MS5 = 5,
    MS6 = 6,
    MS7 = 7,
    MS8 = 8,
    MS9 = 9,
    MS10 = 10,
    #[default]
    Unknown = 999
}


impl From<i16> for MSOrder {
    fn from(value: i16) -> Self {
        match value {
             -3 => Self::NeutralGain,
             -2 => Self::NeutralLoss,
             -1 => Self::ParentScan,
             0 => Self::Any,
             1 => Self::MS,
             2 => Self::MS2,
             3 => Self::MS3,
             4 => Self::MS4,
             5 => Self::MS5,
             6 => Self::MS6,
             7 => Self::MS7,
             8 => Self::MS8,
             9 => Self::MS9,
             10 => Self::MS10,
            _ => Self::Unknown
        }
    }
}

impl Display for MSOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NeutralGain => "Ng",
            Self::NeutralLoss => "Nl",
            Self::ParentScan => "Par",
            Self::Any => "Any",
            Self::MS => "Ms",
            Self::MS2 => "Ms2",
            Self::MS3 => "Ms3",
            Self::MS4 => "Ms4",
            Self::MS5 => "Ms5",
            Self::MS6 => "Ms6",
            Self::MS7 => "Ms7",
            Self::MS8 => "Ms8",
            Self::MS9 => "Ms9",
            Self::MS10 => "Ms10",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}


/// The activation (dissociation) method of a precursor reaction, mirroring
/// Thermo's `ActivationType` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActivationType {
    CollisionInducedDissociation = 0,
    MultiPhotonDissociation = 1,
    ElectronCaptureDissociation = 2,
    PQD = 3,
    ElectronTransferDissociation = 4,
    HigherEnergyCollisionalDissociation = 5,
    #[default]
    Any = 6,
    SAactivation = 7,
    ProtonTransferReaction = 8,
    NegativeElectronTransferDissociation = 9,
    NegativeProtonTransferReaction = 10,
    UltraVioletPhotoDissociation = 11,
    LastActivation = 255,
}

impl From<u8> for ActivationType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::CollisionInducedDissociation,
            1 => Self::MultiPhotonDissociation,
            2 => Self::ElectronCaptureDissociation,
            3 => Self::PQD,
            4 => Self::ElectronTransferDissociation,
            5 => Self::HigherEnergyCollisionalDissociation,
            6 => Self::Any,
            7 => Self::SAactivation,
            8 => Self::ProtonTransferReaction,
            9 => Self::NegativeElectronTransferDissociation,
            10 => Self::NegativeProtonTransferReaction,
            11 => Self::UltraVioletPhotoDissociation,
            _ => Self::LastActivation,
        }
    }
}

impl Display for ActivationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ms_order_display() {
        assert_eq!(MSOrder::from(2).to_string(), "Ms2");
        assert_eq!(MSOrder::from(1).to_string(), "Ms");
        assert_eq!(MSOrder::from(42), MSOrder::Unknown);
    }

    #[test]
    fn test_code_conversions() {
        assert_eq!(Device::from(0), Device::MS);
        assert_eq!(Device::from(-7), Device::None);
        assert_eq!(ActivationType::from(5), ActivationType::HigherEnergyCollisionalDissociation);
        assert_eq!(IonizationMode::from(3), IonizationMode::ElectroSpray);
    }
}
