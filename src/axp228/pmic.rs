//! PMIC core: DC-DC frequency, power-off voltage, ADC and protection setup plus IRQ init.

use embedded_hal::i2c::I2c;

use crate::fdt::ConfigSource;

use super::bus::{Axp228Bus, RegisterAccessible, Result};
use super::regs::*;
use super::types::*;

/// Node holding the `axp228,*` properties.
pub const PMIC_NODE: &str = "init-axp228";

/// PMIC-level configuration. `None` means "not configured, leave the register alone".
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PmicPlatdata {
    pub freq_spread_en: Option<i32>,
    pub spread_freq: Option<i32>,
    pub poly_phase_function: Option<i32>,
    pub switch_freq: Option<i32>,
    pub voff_set: Option<i32>,
    pub adc_control3: Option<i32>,
    pub irq_wakeup: Option<i32>,
    pub vbusacin_func: Option<i32>,
    pub vbusacin_status: Option<i32>,
    pub vbus_en: Option<i32>,
    pub pmu_reset: Option<i32>,
    pub overtmu_pwr_off: Option<i32>,
}

impl PmicPlatdata {
    pub fn from_config<S: ConfigSource + ?Sized>(src: &S) -> Self {
        let get = |p: &str| src.get_int(PMIC_NODE, p);
        Self {
            freq_spread_en: get("axp228,freq_spread_en"),
            spread_freq: get("axp228,spread_freq"),
            poly_phase_function: get("axp228,poly_phase_function"),
            switch_freq: get("axp228,switch_freq"),
            voff_set: get("axp228,voff_set"),
            adc_control3: get("axp228,adc_control3"),
            irq_wakeup: get("axp228,irq_wakeup"),
            vbusacin_func: get("axp228,vbusacin_func"),
            vbusacin_status: get("axp228,vbusacin_status"),
            vbus_en: get("axp228,vbus_en"),
            pmu_reset: get("axp228,pmu_reset"),
            overtmu_pwr_off: get("axp228,overtmu_pwr_off"),
        }
    }
}

/// Interrupt enables and status clears applied on every probe.
const IRQ_INIT: [(u8, u8); 10] = [
    (REG_INTEN1, 0xd8),
    (REG_INTEN2, 0xff),
    (REG_INTEN3, 0x00),
    (REG_INTEN4, 0x01),
    (REG_INTEN5, 0x00),
    (REG_INTSTS1, 0xff),
    (REG_INTSTS2, 0xff),
    (REG_INTSTS3, 0xff),
    (REG_INTSTS4, 0xff),
    (REG_INTSTS5, 0xff),
];

/// AXP228 PMIC front-end.
pub struct Axp228Pmic<I2C> {
    pub(crate) bus: Axp228Bus<I2C>,
}

impl<I2C> Axp228Pmic<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self { Self { bus: Axp228Bus::new(i2c) } }

    pub fn with_address(i2c: I2C, addr: u8) -> Self { Self { bus: Axp228Bus::with_address(i2c, addr) } }

    pub fn release(self) -> I2C { self.bus.release() }

    /// Apply the configuration groups, then enable and clear interrupts.
    ///
    /// A failing group is logged and abandoned; the remaining groups still run.
    pub fn probe(&mut self, pd: &PmicPlatdata) -> ProbeSummary {
        #[cfg(feature = "reg-dump")]
        super::decode::reg_dump(&mut self.bus, "PMIC Register Dump");

        let mut s = ProbeSummary::default();
        s.record("DCDC_FREQSET", self.apply_dcdc_freq(pd));
        s.record("VOFF_SET", self.apply_voff(pd));
        s.record("ADC_CONTROL3", self.apply_adc_control3(pd));
        s.record("HOTOVER_CTL", self.apply_hotover(pd));
        s.record("IRQ init", self.init_chip().map(|_| Outcome::Written));

        #[cfg(feature = "reg-dump")]
        super::decode::reg_dump(&mut self.bus, "PMIC Setup Register Dump");

        if s.failed != 0 {
            error!("AXP228: device init fail, {} group(s) failed", s.failed);
        }
        s
    }

    /// Read the chip ID, then program interrupt enables and clear pending status.
    pub fn init_chip(&mut self) -> Result<u8, I2C::Error> {
        let id = self.bus.read_u8(REG_IC_TYPE)?;
        info!("AXP228 CHIP ID  : 0x{:02x} detected", id);
        for (reg, val) in IRQ_INIT {
            self.bus.write_u8(reg, val)?;
        }
        Ok(id)
    }

    // ------------------ Configuration groups ------------------

    fn apply_dcdc_freq(&mut self, pd: &PmicPlatdata) -> Result<Outcome, I2C::Error> {
        let Some([en, spread, poly, sw]) =
            all_present([pd.freq_spread_en, pd.spread_freq, pd.poly_phase_function, pd.switch_freq])
        else {
            return Err(Error::ConfigurationIncomplete("frequency spread / poly-phase / switch frequency"));
        };
        let Some(v) = pack(&[(en, 1, 7), (spread, 1, 6), (poly, 1, 4), (sw, 0xF, 0)]) else {
            return Err(Error::InvalidInput);
        };
        Ok(self.bus.update(REG_DCDC_FREQSET, 0xFF, v)?.into())
    }

    fn apply_voff(&mut self, pd: &PmicPlatdata) -> Result<Outcome, I2C::Error> {
        let Some(v) = pd.voff_set else { return Ok(Outcome::Skipped) };
        let Some(bits) = pack(&[(v, VOFF_MASK, 0)]) else { return Err(Error::InvalidInput) };
        Ok(self.bus.update(REG_VOFF_SET, VOFF_MASK, bits)?.into())
    }

    fn apply_adc_control3(&mut self, pd: &PmicPlatdata) -> Result<Outcome, I2C::Error> {
        let Some(v) = pd.adc_control3 else { return Ok(Outcome::Skipped) };
        let Some(bits) = pack(&[(v, 0xFF, 0)]) else { return Err(Error::InvalidInput) };
        Ok(self.bus.set_bits(REG_ADC_CONTROL3, bits)?.into())
    }

    fn apply_hotover(&mut self, pd: &PmicPlatdata) -> Result<Outcome, I2C::Error> {
        let Some([wake, func, status, vbus_en, reset, otp]) = all_present([
            pd.irq_wakeup,
            pd.vbusacin_func,
            pd.vbusacin_status,
            pd.vbus_en,
            pd.pmu_reset,
            pd.overtmu_pwr_off,
        ]) else {
            return Err(Error::ConfigurationIncomplete("hot-over / VBUS control"));
        };
        let Some(v) = pack(&[
            (wake, 1, 7),
            (func, 1, 6),
            (status, 1, 5),
            (vbus_en, 1, 4),
            (reset, 1, 3),
            (otp, 1, 2),
            (1, 1, 0),
        ]) else {
            return Err(Error::InvalidInput);
        };
        Ok(self.bus.update(REG_HOTOVER_CTL, 0xFF, v)?.into())
    }
}

/// OR together `(value, max, shift)` fields. `None` if any value falls outside `0..=max`.
fn pack(fields: &[(i32, u8, u8)]) -> Option<u8> {
    fields.iter().try_fold(0u8, |acc, &(v, max, shift)| {
        let b = u8::try_from(v).ok().filter(|b| *b <= max)?;
        Some(acc | (b << shift))
    })
}

impl<I2C> RegisterAccessible for Axp228Pmic<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn reg_count(&self) -> usize { self.bus.reg_count() }

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), I2C::Error> { self.bus.read(reg, buf) }

    fn write(&mut self, reg: u8, bytes: &[u8]) -> Result<(), I2C::Error> { self.bus.write(reg, bytes) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fdt::{Node, Property, PropertyTable};
    use crate::testutil::MockI2c;

    fn full() -> PmicPlatdata {
        PmicPlatdata {
            freq_spread_en: Some(1),
            spread_freq: Some(0),
            poly_phase_function: Some(1),
            switch_freq: Some(8),
            voff_set: Some(3),
            adc_control3: Some(0x10),
            irq_wakeup: Some(1),
            vbusacin_func: Some(0),
            vbusacin_status: Some(1),
            vbus_en: Some(1),
            pmu_reset: Some(0),
            overtmu_pwr_off: Some(1),
        }
    }

    #[test]
    fn platdata_distinguishes_zero_from_absent() {
        static T: PropertyTable<'static> = PropertyTable::new(&[Node {
            path: PMIC_NODE,
            props: &[Property::int("axp228,voff_set", 0), Property::int("axp228,switch_freq", 8)],
        }]);
        let pd = PmicPlatdata::from_config(&T);
        assert_eq!(pd.voff_set, Some(0));
        assert_eq!(pd.switch_freq, Some(8));
        assert_eq!(pd.freq_spread_en, None);
    }

    #[test]
    fn full_probe_programs_every_group() {
        let mut i2c = MockI2c::with(&[(REG_IC_TYPE, 0x06), (REG_VOFF_SET, 0xF0)]);
        let mut pmic = Axp228Pmic::new(&mut i2c);
        let s = pmic.probe(&full());
        assert_eq!(s.failed, 0);
        assert_eq!(s.incomplete, 0);
        assert_eq!(i2c.regs[REG_DCDC_FREQSET as usize], 0x80 | 0x10 | 0x08);
        assert_eq!(i2c.regs[REG_VOFF_SET as usize], 0xF3);
        assert_eq!(i2c.regs[REG_ADC_CONTROL3 as usize], 0x10);
        assert_eq!(i2c.regs[REG_HOTOVER_CTL as usize], 0x80 | 0x20 | 0x10 | 0x04 | 0x01);
        assert_eq!(i2c.regs[REG_INTEN1 as usize], 0xd8);
        assert_eq!(i2c.regs[REG_INTSTS5 as usize], 0xff);
    }

    #[test]
    fn partial_composite_writes_nothing() {
        let mut pd = full();
        pd.switch_freq = None;
        pd.pmu_reset = None;
        pd.voff_set = None;
        pd.adc_control3 = None;
        let mut i2c = MockI2c::default();
        let mut pmic = Axp228Pmic::new(&mut i2c);
        let s = pmic.probe(&pd);
        assert_eq!(s.incomplete, 2);
        assert_eq!(s.skipped, 2);
        assert!(i2c.writes_to(REG_DCDC_FREQSET).is_empty());
        assert!(i2c.writes_to(REG_HOTOVER_CTL).is_empty());
        assert!(i2c.writes_to(REG_VOFF_SET).is_empty());
    }

    #[test]
    fn failing_group_does_not_stop_probe() {
        let mut i2c = MockI2c::default();
        i2c.fail_reg = Some(REG_VOFF_SET);
        let mut pmic = Axp228Pmic::new(&mut i2c);
        let s = pmic.probe(&full());
        assert_eq!(s.failed, 1);
        assert_eq!(i2c.regs[REG_HOTOVER_CTL as usize] & 0x01, 0x01);
        assert_eq!(i2c.regs[REG_INTEN2 as usize], 0xff);
    }

    #[test]
    fn second_pass_rewrites_only_irq_registers() {
        let mut i2c = MockI2c::default();
        let mut pmic = Axp228Pmic::new(&mut i2c);
        pmic.probe(&full());
        let first = i2c.writes.len();
        let mut pmic = Axp228Pmic::new(&mut i2c);
        let s = pmic.probe(&full());
        // only the ten IRQ registers are rewritten
        assert_eq!(i2c.writes.len() - first, 10);
        assert_eq!(i2c.writes_to(REG_DCDC_FREQSET).len(), 1);
        assert_eq!(i2c.writes_to(REG_HOTOVER_CTL).len(), 1);
        assert_eq!(s.unchanged, 4);
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let mut pd = full();
        pd.switch_freq = Some(0x10);
        pd.vbus_en = Some(2);
        pd.voff_set = Some(-1);
        let mut i2c = MockI2c::with(&[(REG_DCDC_FREQSET, 0x55), (REG_HOTOVER_CTL, 0x41)]);
        let mut pmic = Axp228Pmic::new(&mut i2c);
        let s = pmic.probe(&pd);
        assert_eq!(s.failed, 3);
        assert!(i2c.writes_to(REG_DCDC_FREQSET).is_empty());
        assert!(i2c.writes_to(REG_HOTOVER_CTL).is_empty());
        assert!(i2c.writes_to(REG_VOFF_SET).is_empty());
        assert_eq!(i2c.regs[REG_DCDC_FREQSET as usize], 0x55);
    }
}
