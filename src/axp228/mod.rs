//! X-Powers AXP228 power management IC.
//!
//! The chip sits on one I²C address and exposes three views here: [`Axp228Pmic`] for chip
//! level setup and the sixteen voltage rails, and [`Axp228Charger`] for the charger and fuel
//! gauge. Both only touch a register when the configured value differs from what is there.

pub mod bus;
pub mod codec;
pub mod decode;
pub mod regs;
pub mod types;

mod charger;
mod pmic;
mod regulator;

pub use bus::{Axp228Bus, RegisterAccessible};
pub use charger::{
    Axp228Charger, ChargeControllable, ChargerPlatdata, ChargerReport, NoUsbDetect, UsbHostDetect, CHARGER_NODE,
};
pub use pmic::{Axp228Pmic, PmicPlatdata, PMIC_NODE};
pub use regulator::{Rail, RailId, RegulatorPlatdata, VoltageRange, RAILS, REGULATOR_NODE};
pub use types::{BusOp, ChargeType, Error, Outcome, ProbeSummary};
