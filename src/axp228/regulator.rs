//! DC-DC and LDO rails.
//!
//! Each rail is a row in [`RAILS`]: where its voltage field lives, what range it covers,
//! and which bit turns it on. Per-rail configuration sits under
//! `voltage-regulators/<name>` as `axp228,vol` (mV), `axp228,on` and, for the DC-DC
//! converters, `axp228,work_mode` (0 = auto PFM/PWM, 1 = forced PWM).

use embedded_hal::i2c::I2c;

use crate::fdt::ConfigSource;

use super::bus::{RegisterAccessible, Result};
use super::pmic::Axp228Pmic;
use super::regs::*;
use super::types::*;

pub const REGULATOR_NODE: &str = "voltage-regulators";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RailId {
    Dcdc1,
    Dcdc2,
    Dcdc3,
    Dcdc4,
    Dcdc5,
    Aldo1,
    Aldo2,
    Aldo3,
    Dldo1,
    Dldo2,
    Dldo3,
    Dldo4,
    Eldo1,
    Eldo2,
    Eldo3,
    Dc5ldo,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VoltageRange {
    pub min_mv: u16,
    pub max_mv: u16,
    pub step_mv: u16,
}

impl VoltageRange {
    const fn new(min_mv: u16, max_mv: u16, step_mv: u16) -> Self {
        Self { min_mv, max_mv, step_mv }
    }

    /// Selector for `mv`, rounding down to the step below. `None` outside the range.
    pub fn encode(&self, mv: i32) -> Option<u8> {
        if mv < i32::from(self.min_mv) || mv > i32::from(self.max_mv) {
            return None;
        }
        Some(((mv - i32::from(self.min_mv)) / i32::from(self.step_mv)) as u8)
    }

    pub fn decode(&self, sel: u8) -> u16 {
        self.min_mv + u16::from(sel) * self.step_mv
    }
}

const DCDC1_RANGE: VoltageRange = VoltageRange::new(1600, 3400, 100);
const DCDC234_RANGE: VoltageRange = VoltageRange::new(600, 1540, 20);
const DCDC5_RANGE: VoltageRange = VoltageRange::new(1000, 2550, 50);
const LDO_RANGE: VoltageRange = VoltageRange::new(700, 3300, 100);
const DC5LDO_RANGE: VoltageRange = VoltageRange::new(700, 1400, 100);

#[derive(Copy, Clone, Debug)]
pub struct Rail {
    pub id: RailId,
    pub name: &'static str,
    pub vol_reg: u8,
    pub vol_mask: u8,
    pub range: VoltageRange,
    pub en_reg: u8,
    pub en_bit: u8,
    /// DCDC_MODESET bit, DC-DC converters only.
    pub mode_bit: Option<u8>,
}

const fn rail(
    id: RailId,
    name: &'static str,
    vol_reg: u8,
    vol_mask: u8,
    range: VoltageRange,
    en_reg: u8,
    en_bit: u8,
    mode_bit: Option<u8>,
) -> Rail {
    Rail { id, name, vol_reg, vol_mask, range, en_reg, en_bit, mode_bit }
}

pub static RAILS: [Rail; 16] = [
    rail(RailId::Dcdc1, "dcdc1", REG_DC1OUT_VOL, 0x1F, DCDC1_RANGE, REG_LDO_DC_EN1, 1, Some(0)),
    rail(RailId::Dcdc2, "dcdc2", REG_DC2OUT_VOL, 0x3F, DCDC234_RANGE, REG_LDO_DC_EN1, 2, Some(1)),
    rail(RailId::Dcdc3, "dcdc3", REG_DC3OUT_VOL, 0x3F, DCDC234_RANGE, REG_LDO_DC_EN1, 3, Some(2)),
    rail(RailId::Dcdc4, "dcdc4", REG_DC4OUT_VOL, 0x3F, DCDC234_RANGE, REG_LDO_DC_EN1, 4, Some(3)),
    rail(RailId::Dcdc5, "dcdc5", REG_DC5OUT_VOL, 0x1F, DCDC5_RANGE, REG_LDO_DC_EN1, 5, Some(4)),
    rail(RailId::Aldo1, "aldo1", REG_ALDO1OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN1, 6, None),
    rail(RailId::Aldo2, "aldo2", REG_ALDO2OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN1, 7, None),
    rail(RailId::Aldo3, "aldo3", REG_ALDO3OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN3, 7, None),
    rail(RailId::Dldo1, "dldo1", REG_DLDO1OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN2, 3, None),
    rail(RailId::Dldo2, "dldo2", REG_DLDO2OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN2, 4, None),
    rail(RailId::Dldo3, "dldo3", REG_DLDO3OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN2, 5, None),
    rail(RailId::Dldo4, "dldo4", REG_DLDO4OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN2, 6, None),
    rail(RailId::Eldo1, "eldo1", REG_ELDO1OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN2, 0, None),
    rail(RailId::Eldo2, "eldo2", REG_ELDO2OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN2, 1, None),
    rail(RailId::Eldo3, "eldo3", REG_ELDO3OUT_VOL, 0x1F, LDO_RANGE, REG_LDO_DC_EN2, 2, None),
    rail(RailId::Dc5ldo, "dc5ldo", REG_DC5LDOOUT_VOL, 0x07, DC5LDO_RANGE, REG_LDO_DC_EN1, 0, None),
];

impl RailId {
    pub fn rail(self) -> &'static Rail {
        // RAILS is declared in RailId order
        &RAILS[self as usize]
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RegulatorPlatdata {
    pub vol: Option<i32>,
    pub on: Option<i32>,
    pub work_mode: Option<i32>,
}

impl RegulatorPlatdata {
    /// `None` when the rail has no node at all.
    pub fn from_config<S: ConfigSource + ?Sized>(src: &S, rail: &Rail) -> Option<Self> {
        let mut path: heapless::String<40> = heapless::String::new();
        path.push_str(REGULATOR_NODE).ok()?;
        path.push('/').ok()?;
        path.push_str(rail.name).ok()?;
        if !src.has_node(&path) {
            return None;
        }
        Some(Self {
            vol: src.get_int(&path, "axp228,vol"),
            on: src.get_int(&path, "axp228,on"),
            work_mode: src.get_int(&path, "axp228,work_mode"),
        })
    }
}

impl<I2C> Axp228Pmic<I2C>
where
    I2C: I2c,
{
    pub fn set_rail_voltage(&mut self, id: RailId, mv: i32) -> Result<bool, I2C::Error> {
        let r = id.rail();
        let sel = r.range.encode(mv).ok_or(Error::InvalidInput)?;
        self.bus.update(r.vol_reg, r.vol_mask, sel & r.vol_mask)
    }

    pub fn rail_voltage(&mut self, id: RailId) -> Result<u16, I2C::Error> {
        let r = id.rail();
        let sel = self.bus.read_u8(r.vol_reg)? & r.vol_mask;
        Ok(r.range.decode(sel))
    }

    pub fn set_rail_enabled(&mut self, id: RailId, on: bool) -> Result<bool, I2C::Error> {
        let r = id.rail();
        self.bus.assign_bits(r.en_reg, 1 << r.en_bit, on)
    }

    pub fn rail_enabled(&mut self, id: RailId) -> Result<bool, I2C::Error> {
        let r = id.rail();
        Ok(self.bus.read_u8(r.en_reg)? & (1 << r.en_bit) != 0)
    }

    /// Force PWM (`true`) or let the converter drop to PFM at light load.
    pub fn set_rail_pwm(&mut self, id: RailId, pwm: bool) -> Result<bool, I2C::Error> {
        let bit = id.rail().mode_bit.ok_or(Error::InvalidInput)?;
        self.bus.assign_bits(REG_DCDC_MODESET, 1 << bit, pwm)
    }

    /// Apply one rail's configuration: voltage first, then mode, then the enable bit.
    pub fn apply_rail(&mut self, id: RailId, pd: &RegulatorPlatdata) -> ProbeSummary {
        let mut s = ProbeSummary::default();
        let name = id.rail().name;
        s.record(name, match pd.vol {
            Some(mv) => self.set_rail_voltage(id, mv).map(Outcome::from),
            None => Ok(Outcome::Skipped),
        });
        s.record(name, match pd.work_mode {
            Some(m) if id.rail().mode_bit.is_some() => self.set_rail_pwm(id, m != 0).map(Outcome::from),
            _ => Ok(Outcome::Skipped),
        });
        s.record(name, match pd.on {
            Some(on) => self.set_rail_enabled(id, on != 0).map(Outcome::from),
            None => Ok(Outcome::Skipped),
        });
        s
    }

    /// Apply every rail that has a configuration node.
    pub fn apply_rails<S: ConfigSource + ?Sized>(&mut self, src: &S) -> ProbeSummary {
        let mut s = ProbeSummary::default();
        for r in RAILS.iter() {
            if let Some(pd) = RegulatorPlatdata::from_config(src, r) {
                debug!("AXP228: configuring {}", r.name);
                s.merge(self.apply_rail(r.id, &pd));
            }
        }
        s
    }
}
