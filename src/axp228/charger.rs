//! Battery charger and fuel gauge.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::config;
use crate::fdt::ConfigSource;

use super::bus::{Axp228Bus, RegisterAccessible, Result};
use super::codec::*;
use super::decode;
use super::regs::*;
use super::types::*;

/// Node holding the `chg,*` properties.
pub const CHARGER_NODE: &str = "init-charger";

/// Charger operations exposed to the board.
pub trait ChargeControllable {
    type Error;

    /// Battery voltage in µV, averaged over several ADC samples.
    fn value_vbatt_uv<D: DelayNs>(&mut self, delay: &mut D) -> core::result::Result<u32, Self::Error>;
    /// Fuel gauge state of charge, 0..=100 %.
    fn value_gauge(&mut self) -> core::result::Result<u8, Self::Error>;
    /// Identify the input source. May also retune the VBUS current limit to match it.
    fn charge_type(&mut self) -> core::result::Result<ChargeType, Self::Error>;
    fn charge_current_ua(&mut self) -> core::result::Result<u32, Self::Error>;
    fn set_charge_current_ua(&mut self, ua: u32) -> core::result::Result<(), Self::Error>;
    /// Input current limit for `source` in µA, `0` meaning unlimited.
    fn limit_current_ua(&mut self, source: ChargeType) -> core::result::Result<u32, Self::Error>;
    fn set_limit_current_ua(&mut self, source: ChargeType, ua: u32) -> core::result::Result<(), Self::Error>;
}

/// Asks whether a USB host enumerates the device on VBUS within a timeout.
pub trait UsbHostDetect {
    fn host_connected(&mut self, timeout_ms: u32) -> bool;
}

/// For boards that cannot tell a USB host from a VBUS-only supply: VBUS always counts as
/// a host, so the input stays at the 500 mA USB limit.
pub struct NoUsbDetect;

impl UsbHostDetect for NoUsbDetect {
    fn host_connected(&mut self, _timeout_ms: u32) -> bool {
        true
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChargerPlatdata {
    pub pek_on: Option<i32>,
    pub pek_long: Option<i32>,
    pub pek_off_en: Option<i32>,
    pub pek_off_restart: Option<i32>,
    pub pek_delay: Option<i32>,
    pub pek_off: Option<i32>,
    pub chgled_fun: Option<i32>,
    pub chgled_type: Option<i32>,
    pub batcap_correct: Option<i32>,
    pub batreg_en: Option<i32>,
    pub batdet: Option<i32>,
    pub usb_vol_lim: Option<i32>,
    pub usb_vol_lim_en: Option<i32>,
    pub usb_cur_lim: Option<i32>,
    pub usb_cur_lim_en: Option<i32>,
    pub charge_current: Option<i32>,
    pub limit_current: Option<i32>,
    pub batlow_lv1: Option<i32>,
    pub batlow_lv2: Option<i32>,
    pub ocv_table: Option<Vec<u8, OCV_TABLE_SIZE>>,
    pub batrdc: Option<i32>,
    pub batcap: Option<i32>,
    pub ubc_check_timeout: Option<i32>,
}

impl ChargerPlatdata {
    pub fn from_config<S: ConfigSource + ?Sized>(src: &S) -> Self {
        let get = |p: &str| src.get_int(CHARGER_NODE, p);

        let mut cells = [0u32; OCV_TABLE_SIZE];
        let ocv_table = src
            .get_u32_array(CHARGER_NODE, "chg,ocvreg", &mut cells)
            .map(|n| cells[..n].iter().map(|c| *c as u8).collect());

        Self {
            pek_on: get("chg,pek_on"),
            pek_long: get("chg,pek_long"),
            pek_off_en: get("chg,pek_off_en"),
            pek_off_restart: get("chg,pek_off_restart"),
            pek_delay: get("chg,pek_delay"),
            pek_off: get("chg,pek_off"),
            chgled_fun: get("chg,ghcledfun"),
            chgled_type: get("chg,chgledtype"),
            batcap_correct: get("chg,batcapcorrent"),
            batreg_en: get("chg,batreguen"),
            batdet: get("chg,batdet"),
            usb_vol_lim: get("chg,usbvolim"),
            usb_vol_lim_en: get("chg,usbvollimen"),
            usb_cur_lim: get("chg,usbcurlim"),
            usb_cur_lim_en: get("chg,usbcurlimen"),
            charge_current: get("chg,charge_current"),
            limit_current: get("chg,limit_current"),
            batlow_lv1: get("chg,batlowlv1"),
            batlow_lv2: get("chg,batlowlv2"),
            ocv_table,
            batrdc: get("chg,batrdc"),
            batcap: get("chg,batcap"),
            ubc_check_timeout: get("chg,ubcchecktimeout"),
        }
    }
}

/// Mask and bits accumulated for one shared register, applied in a single update.
#[derive(Default)]
struct Merge {
    mask: u8,
    bits: u8,
}

impl Merge {
    fn field(&mut self, mask: u8, bits: u8) {
        self.mask |= mask;
        self.bits = (self.bits & !mask) | (bits & mask);
    }

    fn flag(&mut self, mask: u8, on: bool) {
        self.field(mask, if on { mask } else { 0 });
    }

    fn apply<B: RegisterAccessible>(self, bus: &mut B, reg: u8) -> Result<Outcome, B::Error> {
        if self.mask == 0 {
            return Ok(Outcome::Skipped);
        }
        Ok(bus.update(reg, self.mask, self.bits)?.into())
    }
}

/// AXP228 charger front-end.
pub struct Axp228Charger<I2C, U = NoUsbDetect> {
    bus: Axp228Bus<I2C>,
    pd: ChargerPlatdata,
    usb: Option<U>,
}

impl<I2C> Axp228Charger<I2C, NoUsbDetect>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, pd: ChargerPlatdata) -> Self {
        Self { bus: Axp228Bus::new(i2c), pd, usb: None }
    }
}

impl<I2C, U> Axp228Charger<I2C, U>
where
    I2C: I2c,
    U: UsbHostDetect,
{
    /// Consult `usb` when VBUS is present to tell a USB host from a VBUS-only adapter.
    pub fn with_usb_detect<V: UsbHostDetect>(self, usb: V) -> Axp228Charger<I2C, V> {
        Axp228Charger { bus: self.bus, pd: self.pd, usb: Some(usb) }
    }

    pub fn platdata(&self) -> &ChargerPlatdata { &self.pd }

    pub fn release(self) -> I2C { self.bus.release() }

    /// Apply the charger configuration groups in order.
    ///
    /// A failing group is logged and abandoned; the remaining groups still run.
    pub fn probe(&mut self) -> ProbeSummary {
        let mut s = ProbeSummary::default();

        s.record("POK_SET", self.apply_power_key());
        s.record("OFF_CTL", self.apply_off_ctl());
        s.record("CHGLED type", self.apply_flag(self.pd.chgled_type, REG_CHGLED_CTL, CHGLED_TYPE_B));
        s.record("capacity correction", self.apply_flag(self.pd.batcap_correct, REG_COULOMB_CTL, CAP_CORRECT_EN));
        s.record("battery regulation", self.apply_flag(self.pd.batreg_en, REG_CHARGE2, BAT_REG_EN));
        s.record("battery detect", self.apply_flag(self.pd.batdet, REG_PDBC, BATDET_EN));
        s.record("USB limits", self.apply_usb_limits());
        s.record("limit current", self.apply_limit_current());
        s.record("charge current", self.apply_charge_current());
        s.record("warning level", self.apply_warning_level());

        let ocv = self.apply_ocv_table();
        let ocv_changed = matches!(ocv, Ok(Outcome::Written));
        s.record("OCV table", ocv);
        s.record("RDC", self.apply_rdc(ocv_changed));
        s.record("battery capacity", self.apply_capacity(ocv_changed));

        if let Err(e) = decode::log_power_status(&mut self.bus) {
            s.record("status", Err::<Outcome, _>(e));
        }

        #[cfg(feature = "reg-dump")]
        decode::reg_dump(&mut self.bus, "Charger Setup Register Dump");

        s
    }

    // ------------------ Configuration groups ------------------

    fn apply_power_key(&mut self) -> Result<Outcome, I2C::Error> {
        let pd = &self.pd;
        let mut m = Merge::default();
        if let Some(t) = pd.pek_on {
            m.field(PEK_ON_MASK, pek_on_bits(t));
        }
        if let Some(t) = pd.pek_long {
            m.field(PEK_LONG_MASK, pek_long_bits(t));
        }
        if let Some(v) = pd.pek_off_en {
            m.flag(PEK_OFF_EN, v != 0);
        }
        if let Some(v) = pd.pek_off_restart {
            m.flag(PEK_OFF_RESTART, v != 0);
        }
        if let Some(t) = pd.pek_off {
            m.field(PEK_OFF_MASK, pek_off_bits(t));
        }
        m.apply(&mut self.bus, REG_POK_SET)
    }

    fn apply_off_ctl(&mut self) -> Result<Outcome, I2C::Error> {
        let mut m = Merge::default();
        if let Some(d) = self.pd.pek_delay {
            m.field(PEK_DELAY_MASK, pek_delay_bits(d));
        }
        if let Some(v) = self.pd.chgled_fun {
            m.flag(CHGLED_FUN, v != 0);
        }
        m.apply(&mut self.bus, REG_OFF_CTL)
    }

    fn apply_flag(&mut self, prop: Option<i32>, reg: u8, mask: u8) -> Result<Outcome, I2C::Error> {
        let Some(v) = prop else { return Ok(Outcome::Skipped) };
        Ok(self.bus.assign_bits(reg, mask, v != 0)?.into())
    }

    fn apply_usb_limits(&mut self) -> Result<Outcome, I2C::Error> {
        let pd = &self.pd;
        let Some([vol, vol_en, cur, cur_en]) =
            all_present([pd.usb_vol_lim, pd.usb_vol_lim_en, pd.usb_cur_lim, pd.usb_cur_lim_en])
        else {
            return Err(Error::ConfigurationIncomplete("usbvolim / usbvollimen / usbcurlim / usbcurlimen"));
        };

        let mut m = Merge::default();
        if vol != 0 && vol_en != 0 {
            match encode_usb_vhold(vol) {
                Some(bits) => m.field(VBUS_VHOLD_MASK, bits),
                None => warn!("AXP228: VBUS hold {} mV out of range, left as is", vol),
            }
        } else {
            m.flag(VBUS_VHOLD_EN, false);
        }
        if cur != 0 && cur_en != 0 {
            let code = if cur == 500 { USB_LIMIT_500 } else { USB_LIMIT_900 };
            m.field(VBUS_CLIMIT_MASK, code);
        } else {
            m.field(VBUS_CLIMIT_MASK, USB_LIMIT_NONE);
        }
        m.apply(&mut self.bus, REG_IPS_SET)
    }

    fn apply_limit_current(&mut self) -> Result<Outcome, I2C::Error> {
        let Some(ua) = self.pd.limit_current else { return Ok(Outcome::Skipped) };
        Ok(self.bus.update(REG_CHARGE3, LIMIT_CUR_MASK, encode_charge_current(ua))?.into())
    }

    fn apply_charge_current(&mut self) -> Result<Outcome, I2C::Error> {
        let Some(ua) = self.pd.charge_current else { return Ok(Outcome::Skipped) };
        let mut written = self.bus.assign_bits(REG_CHARGE1, CHARGE_EN, ua != 0)?;

        let status = self.bus.read_u8(REG_STATUS)?;
        let target = if status & STATUS_ACVA != 0 {
            ua
        } else {
            config::CHARGE_CURRENT_NO_ADAPTER_UA as i32
        };
        written |= self.bus.update(REG_CHARGE1, CHARGE_CUR_MASK, encode_charge_current(target))?;
        Ok(written.into())
    }

    fn apply_warning_level(&mut self) -> Result<Outcome, I2C::Error> {
        let Some([lv1, lv2]) = all_present([self.pd.batlow_lv1, self.pd.batlow_lv2]) else {
            return Err(Error::ConfigurationIncomplete("batlowlv1 / batlowlv2"));
        };
        let v = warning_level(lv1, lv2).ok_or(Error::InvalidInput)?;
        Ok(self.bus.update(REG_WARNING_LEVEL, 0xFF, v)?.into())
    }

    /// Compare the OCV curve byte by byte and rewrite all of it on the first mismatch.
    ///
    /// A bus error during the rewrite leaves the bytes written so far in place. The next
    /// probe sees the mismatch and rewrites the table, RDC and capacity included.
    fn apply_ocv_table(&mut self) -> Result<Outcome, I2C::Error> {
        let Some(table) = self.pd.ocv_table.as_ref() else { return Ok(Outcome::Skipped) };
        let mut differs = false;
        for (i, want) in table.iter().enumerate() {
            if self.bus.read_u8(REG_OCV_TABLE + i as u8)? != *want {
                differs = true;
                break;
            }
        }
        if !differs {
            return Ok(Outcome::Unchanged);
        }
        for (i, v) in table.iter().enumerate() {
            self.bus.write_u8(REG_OCV_TABLE + i as u8, *v)?;
        }
        info!("AXP228: OCV table rewritten ({} entries)", table.len());
        Ok(Outcome::Written)
    }

    fn apply_rdc(&mut self, ocv_changed: bool) -> Result<Outcome, I2C::Error> {
        let Some(mohm) = self.pd.batrdc else { return Ok(Outcome::Skipped) };
        let rdc0 = self.bus.read_u8(REG_RDC0)?;
        if !(ocv_changed || (mohm != 0 && rdc0 & RDC_CALIBRATED == 0)) {
            return Ok(Outcome::Unchanged);
        }
        let [hi, lo] = rdc_bytes(encode_rdc(mohm));
        self.bus.write_u8(REG_RDC0, hi)?;
        self.bus.write_u8(REG_RDC1, lo)?;
        Ok(Outcome::Written)
    }

    fn apply_capacity(&mut self, ocv_changed: bool) -> Result<Outcome, I2C::Error> {
        let Some(mah) = self.pd.batcap else { return Ok(Outcome::Skipped) };
        let hi = self.bus.read_u8(REG_BATFULLCAPH_RES)?;
        if ocv_changed || (mah != 0 && hi & BATCAP_VALID == 0) {
            let [h, l] = capacity_bytes(encode_capacity(mah));
            self.bus.write_u8(REG_BATFULLCAPH_RES, h)?;
            self.bus.write_u8(REG_BATFULLCAPL_RES, l)?;
            return Ok(Outcome::Written);
        }
        if mah == 0 {
            let lo = self.bus.read_u8(REG_BATFULLCAPL_RES)?;
            if hi != 0 || lo != 0 {
                self.bus.write_u8(REG_BATFULLCAPH_RES, 0)?;
                self.bus.write_u8(REG_BATFULLCAPL_RES, 0)?;
                return Ok(Outcome::Written);
            }
        }
        Ok(Outcome::Unchanged)
    }

    // ------------------ ADC ------------------

    fn read_adc(&mut self, h_reg: u8) -> Result<u16, I2C::Error> {
        let h = self.bus.read_u8(h_reg)?;
        let l = self.bus.read_u8(h_reg + 1)?;
        Ok(adc12(h, l))
    }

    /// Open-circuit battery voltage estimate in mV.
    pub fn value_ocv_mv(&mut self) -> Result<u32, I2C::Error> {
        Ok(ocv_mv(self.read_adc(REG_OCVBATH_RES)?))
    }

    pub fn value_ichg_ma(&mut self) -> Result<u32, I2C::Error> {
        Ok(icharge_ma(self.read_adc(REG_ICHGH_RES)?))
    }

    pub fn value_idischg_ma(&mut self) -> Result<u32, I2C::Error> {
        Ok(ibat_ma(self.read_adc(REG_DISICHGH_RES)?))
    }

    fn set_usb_limit(&mut self, code: u8) -> Result<bool, I2C::Error> {
        self.bus.update(REG_IPS_SET, VBUS_CLIMIT_MASK, code)
    }
}

impl<I2C, U> ChargeControllable for Axp228Charger<I2C, U>
where
    I2C: I2c,
    U: UsbHostDetect,
{
    type Error = Error<I2C::Error>;

    fn value_vbatt_uv<D: DelayNs>(&mut self, delay: &mut D) -> Result<u32, I2C::Error> {
        let mut sum = 0u32;
        for _ in 0..config::VBATT_SAMPLES {
            delay.delay_ms(config::VBATT_SAMPLE_INTERVAL_MS);
            sum += vbat_mv(self.read_adc(REG_VBATH_RES)?);
        }
        Ok(sum / config::VBATT_SAMPLES * 1000)
    }

    fn value_gauge(&mut self) -> Result<u8, I2C::Error> {
        Ok(self.bus.read_u8(REG_CAP)? & CAP_PERCENT_MASK)
    }

    fn charge_type(&mut self) -> Result<ChargeType, I2C::Error> {
        let st = self.bus.read_u8(REG_STATUS)?;
        if st & STATUS_ACEN != 0 {
            return Ok(ChargeType::Adapter);
        }
        if st & STATUS_USBEN == 0 {
            self.set_usb_limit(USB_LIMIT_500)?;
            return Ok(ChargeType::None);
        }
        let timeout = self
            .pd
            .ubc_check_timeout
            .map_or(config::USB_HOST_CHECK_TIMEOUT_MS, |t| t.max(0) as u32);
        let host = self.usb.as_mut().map(|usb| usb.host_connected(timeout));
        match host {
            Some(false) => {
                // VBUS without a host behind it: a dumb charger, allow more current
                self.set_usb_limit(USB_LIMIT_900)?;
                Ok(ChargeType::Adapter)
            }
            _ => {
                self.set_usb_limit(USB_LIMIT_500)?;
                Ok(ChargeType::Usb)
            }
        }
    }

    fn charge_current_ua(&mut self) -> Result<u32, I2C::Error> {
        Ok(decode_charge_current(self.bus.read_u8(REG_CHARGE1)?))
    }

    fn set_charge_current_ua(&mut self, ua: u32) -> Result<(), I2C::Error> {
        let ua = i32::try_from(ua).unwrap_or(i32::MAX);
        self.bus.update(REG_CHARGE1, CHARGE_CUR_MASK, encode_charge_current(ua))?;
        Ok(())
    }

    fn limit_current_ua(&mut self, source: ChargeType) -> Result<u32, I2C::Error> {
        match source {
            ChargeType::Adapter => Ok(decode_charge_current(self.bus.read_u8(REG_CHARGE3)?)),
            ChargeType::Usb => Ok(decode_usb_limit(self.bus.read_u8(REG_IPS_SET)?)),
            ChargeType::None => Err(Error::InvalidInput),
        }
    }

    fn set_limit_current_ua(&mut self, source: ChargeType, ua: u32) -> Result<(), I2C::Error> {
        match source {
            ChargeType::Adapter => {
                let ua = i32::try_from(ua).unwrap_or(i32::MAX);
                self.bus.update(REG_CHARGE3, LIMIT_CUR_MASK, encode_charge_current(ua))?;
            }
            ChargeType::Usb => {
                self.set_usb_limit(encode_usb_limit(ua))?;
            }
            ChargeType::None => return Err(Error::InvalidInput),
        }
        Ok(())
    }
}

/// Snapshot printed at boot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChargerReport {
    pub kind: ChargeType,
    pub vbatt_mv: u32,
    pub gauge: u8,
    pub charge_ma: u32,
    pub adp_limit_ma: u32,
    /// `None` when VBUS is unlimited.
    pub usb_limit_ma: Option<u32>,
}

impl ChargerReport {
    pub fn collect<C, D>(chg: &mut C, delay: &mut D) -> core::result::Result<Self, C::Error>
    where
        C: ChargeControllable,
        D: DelayNs,
    {
        let kind = chg.charge_type()?;
        let vbatt_mv = chg.value_vbatt_uv(delay)? / 1000;
        let gauge = chg.value_gauge()?;
        let charge_ma = chg.charge_current_ua()? / 1000;
        let adp_limit_ma = chg.limit_current_ua(ChargeType::Adapter)? / 1000;
        let usb = chg.limit_current_ua(ChargeType::Usb)? / 1000;
        Ok(Self {
            kind,
            vbatt_mv,
            gauge,
            charge_ma,
            adp_limit_ma,
            usb_limit_ma: (usb != 0).then_some(usb),
        })
    }

    pub fn log(&self) {
        info!("AXP228 Charger: Type             : {}", self.kind.label());
        info!("AXP228 Charger: Vbatt            : {}mV", self.vbatt_mv);
        info!("AXP228 Charger: Gauge            : {}%", self.gauge);
        info!("AXP228 Charger: Charge Current   : {}mA", self.charge_ma);
        info!("AXP228 Charger: ADP Limit        : {}mA", self.adp_limit_ma);
        match self.usb_limit_ma {
            Some(ma) => info!("AXP228 Charger: USB Limit        : {}mA", ma),
            None => info!("AXP228 Charger: USB Limit        : No limit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fdt::{Node, Property, PropertyTable};
    use crate::testutil::{MockI2c, NoDelay};

    fn usb_pd() -> ChargerPlatdata {
        ChargerPlatdata {
            usb_vol_lim: Some(4400),
            usb_vol_lim_en: Some(1),
            usb_cur_lim: Some(500),
            usb_cur_lim_en: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn absent_usb_group_leaves_ips_set_alone() {
        let mut i2c = MockI2c::with(&[(REG_IPS_SET, 0x63)]);
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default());
        let s = chg.probe();
        assert_eq!(s.failed, 0);
        assert!(i2c.writes_to(REG_IPS_SET).is_empty());
        assert!(!i2c.reads.contains(&REG_IPS_SET));
        assert_eq!(i2c.regs[REG_IPS_SET as usize], 0x63);
    }

    #[test]
    fn partial_usb_group_is_incomplete() {
        let mut pd = usb_pd();
        pd.usb_cur_lim_en = None;
        let mut i2c = MockI2c::default();
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        let s = chg.probe();
        // USB limits and warning levels
        assert_eq!(s.incomplete, 2);
        assert!(i2c.writes_to(REG_IPS_SET).is_empty());
    }

    #[test]
    fn usb_limits_program_vhold_and_500ma() {
        let mut i2c = MockI2c::with(&[(REG_IPS_SET, 0x43)]);
        let mut chg = Axp228Charger::new(&mut i2c, usb_pd());
        chg.probe();
        // 4400 mV -> 4 << 3, 500 mA -> 0b01, VHOLD enable untouched
        assert_eq!(i2c.regs[REG_IPS_SET as usize], 0x40 | 0x20 | 0x01);
    }

    #[test]
    fn disabled_usb_limits_clear_vhold_and_lift_current_limit() {
        let mut pd = usb_pd();
        pd.usb_vol_lim_en = Some(0);
        pd.usb_cur_lim = Some(0);
        let mut i2c = MockI2c::with(&[(REG_IPS_SET, 0x60)]);
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        chg.probe();
        assert_eq!(i2c.regs[REG_IPS_SET as usize], 0x20 | 0x03);
    }

    #[test]
    fn power_key_fields_merge_into_one_write() {
        let pd = ChargerPlatdata {
            pek_on: Some(1000),
            pek_long: Some(1500),
            pek_off_en: Some(1),
            pek_off: Some(6000),
            ..Default::default()
        };
        let mut i2c = MockI2c::with(&[(REG_POK_SET, 0x04)]);
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        chg.probe();
        assert_eq!(i2c.writes_to(REG_POK_SET), std::vec![std::vec![0x40 | 0x10 | 0x08 | 0x04 | 0x01]]);
    }

    #[test]
    fn charge_current_falls_back_without_adapter() {
        let pd = ChargerPlatdata { charge_current: Some(1_500_000), ..Default::default() };
        let mut i2c = MockI2c::default();
        let mut chg = Axp228Charger::new(&mut i2c, pd.clone());
        chg.probe();
        // enabled, 500 mA -> code 1
        assert_eq!(i2c.regs[REG_CHARGE1 as usize], 0x80 | 0x01);

        let mut i2c = MockI2c::with(&[(REG_STATUS, STATUS_ACVA)]);
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        chg.probe();
        assert_eq!(i2c.regs[REG_CHARGE1 as usize], 0x80 | 0x08);
    }

    #[test]
    fn zero_charge_current_disables_charging() {
        let pd = ChargerPlatdata { charge_current: Some(0), ..Default::default() };
        let mut i2c = MockI2c::with(&[(REG_CHARGE1, 0xC8), (REG_STATUS, STATUS_ACVA)]);
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        chg.probe();
        assert_eq!(i2c.regs[REG_CHARGE1 as usize], 0x40);
    }

    #[test]
    fn ocv_mismatch_rewrites_table_and_calibration() {
        let mut ocv: Vec<u8, OCV_TABLE_SIZE> = Vec::new();
        ocv.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x02, 0x05]).unwrap();
        let pd = ChargerPlatdata {
            ocv_table: Some(ocv),
            batrdc: Some(100),
            batcap: Some(4000),
            ..Default::default()
        };
        // calibration flags already set: only the OCV mismatch forces the rewrite
        let mut i2c = MockI2c::with(&[(REG_RDC0, 0x40), (REG_BATFULLCAPH_RES, 0x80)]);
        let mut chg = Axp228Charger::new(&mut i2c, pd.clone());
        chg.probe();
        assert_eq!(i2c.regs[REG_OCV_TABLE as usize + 4], 0x02);
        assert_eq!(i2c.regs[REG_OCV_TABLE as usize + 5], 0x05);
        assert_eq!(i2c.writes.iter().filter(|(r, _)| (0xC0..0xC6).contains(r)).count(), 6);
        assert_eq!(i2c.regs[REG_RDC0 as usize], 0x80);
        assert_eq!(i2c.regs[REG_RDC1 as usize], 93);
        assert_eq!(i2c.regs[REG_BATFULLCAPH_RES as usize], 0x8A);
        assert_eq!(i2c.regs[REG_BATFULLCAPL_RES as usize], 0xBB);

        // second boot: table matches, flags set -> nothing rewritten
        i2c.regs[REG_RDC0 as usize] |= RDC_CALIBRATED;
        let before = i2c.writes.len();
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        chg.probe();
        assert_eq!(i2c.writes.len(), before);
    }

    #[test]
    fn zero_capacity_clears_calibration() {
        let pd = ChargerPlatdata { batcap: Some(0), ..Default::default() };
        let mut i2c = MockI2c::with(&[(REG_BATFULLCAPH_RES, 0x8A), (REG_BATFULLCAPL_RES, 0xBB)]);
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        chg.probe();
        assert_eq!(i2c.regs[REG_BATFULLCAPH_RES as usize], 0);
        assert_eq!(i2c.regs[REG_BATFULLCAPL_RES as usize], 0);
    }

    #[test]
    fn out_of_range_warning_level_is_rejected() {
        let pd = ChargerPlatdata { batlow_lv1: Some(30), batlow_lv2: Some(0), ..Default::default() };
        let mut i2c = MockI2c::default();
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        let s = chg.probe();
        assert_eq!(s.failed, 1);
        assert!(i2c.writes_to(REG_WARNING_LEVEL).is_empty());
    }

    #[test]
    fn failing_group_does_not_stop_later_groups() {
        let pd = ChargerPlatdata {
            pek_on: Some(1500),
            batlow_lv1: Some(15),
            batlow_lv2: Some(0),
            batrdc: Some(100),
            batcap: Some(4000),
            ..Default::default()
        };
        let mut i2c = MockI2c::default();
        i2c.fail_reg = Some(REG_POK_SET);
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        let s = chg.probe();
        assert_eq!(s.failed, 1);
        assert!(i2c.writes_to(REG_POK_SET).is_empty());
        assert_eq!(i2c.regs[REG_WARNING_LEVEL as usize], 0xA0);
        assert_eq!(i2c.regs[REG_RDC0 as usize], 0x80);
        assert_eq!(i2c.regs[REG_RDC1 as usize], 93);
        assert_eq!(i2c.regs[REG_BATFULLCAPH_RES as usize], 0x8A);
        assert_eq!(i2c.regs[REG_BATFULLCAPL_RES as usize], 0xBB);
    }

    #[test]
    fn interrupted_ocv_rewrite_is_finished_next_boot() {
        let mut ocv: Vec<u8, OCV_TABLE_SIZE> = Vec::new();
        ocv.extend_from_slice(&[0x01, 0x00, 0x00, 0x00, 0x02, 0x05]).unwrap();
        let pd = ChargerPlatdata {
            ocv_table: Some(ocv),
            batrdc: Some(100),
            batcap: Some(4000),
            ..Default::default()
        };
        let mut i2c = MockI2c::with(&[(REG_RDC0, RDC_CALIBRATED), (REG_BATFULLCAPH_RES, 0x80)]);
        i2c.fail_reg = Some(REG_OCV_TABLE + 4);
        let mut chg = Axp228Charger::new(&mut i2c, pd.clone());
        let s = chg.probe();
        assert_eq!(s.failed, 1);
        // bytes before the failing one are in place, calibration untouched
        assert_eq!(i2c.writes.iter().filter(|(r, _)| (0xC0..0xC6).contains(r)).count(), 4);
        assert_eq!(i2c.regs[REG_OCV_TABLE as usize], 0x01);
        assert!(i2c.writes_to(REG_RDC0).is_empty());
        assert!(i2c.writes_to(REG_BATFULLCAPH_RES).is_empty());

        i2c.fail_reg = None;
        let mut chg = Axp228Charger::new(&mut i2c, pd);
        let s = chg.probe();
        assert_eq!(s.failed, 0);
        assert_eq!(i2c.regs[REG_OCV_TABLE as usize + 4], 0x02);
        assert_eq!(i2c.regs[REG_OCV_TABLE as usize + 5], 0x05);
        assert_eq!(i2c.regs[REG_RDC0 as usize], 0x80);
        assert_eq!(i2c.regs[REG_BATFULLCAPH_RES as usize], 0x8A);
    }

    #[test]
    fn undetectable_host_keeps_usb_limit() {
        let mut i2c = MockI2c::with(&[(REG_STATUS, STATUS_USBEN)]);
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default()).with_usb_detect(NoUsbDetect);
        assert_eq!(chg.charge_type(), Ok(ChargeType::Usb));
        assert_eq!(chg.limit_current_ua(ChargeType::Usb), Ok(500_000));
    }

    struct Host(bool, u32);

    impl UsbHostDetect for Host {
        fn host_connected(&mut self, timeout_ms: u32) -> bool {
            self.1 = timeout_ms;
            self.0
        }
    }

    #[test]
    fn charge_type_follows_power_status() {
        let mut i2c = MockI2c::with(&[(REG_STATUS, STATUS_ACEN | STATUS_ACVA), (REG_IPS_SET, 0x03)]);
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default());
        assert_eq!(chg.charge_type(), Ok(ChargeType::Adapter));
        assert_eq!(i2c.regs[REG_IPS_SET as usize], 0x03);

        i2c.regs[REG_STATUS as usize] = STATUS_USBEN;
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default());
        assert_eq!(chg.charge_type(), Ok(ChargeType::Usb));
        assert_eq!(i2c.regs[REG_IPS_SET as usize], USB_LIMIT_500);

        i2c.regs[REG_STATUS as usize] = 0;
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default());
        assert_eq!(chg.charge_type(), Ok(ChargeType::None));
    }

    #[test]
    fn vbus_without_host_counts_as_adapter() {
        let pd = ChargerPlatdata { ubc_check_timeout: Some(250), ..Default::default() };
        let mut i2c = MockI2c::with(&[(REG_STATUS, STATUS_USBEN)]);
        let mut chg = Axp228Charger::new(&mut i2c, pd).with_usb_detect(Host(false, 0));
        assert_eq!(chg.charge_type(), Ok(ChargeType::Adapter));
        assert_eq!(chg.usb.as_ref().map(|h| h.1), Some(250));
        assert_eq!(chg.limit_current_ua(ChargeType::Usb), Ok(900_000));

        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default()).with_usb_detect(Host(true, 0));
        assert_eq!(chg.charge_type(), Ok(ChargeType::Usb));
        assert_eq!(chg.usb.as_ref().map(|h| h.1), Some(500));
        assert_eq!(chg.limit_current_ua(ChargeType::Usb), Ok(500_000));
    }

    #[test]
    fn vbatt_averages_five_samples() {
        let mut i2c = MockI2c::with(&[(REG_VBATH_RES, 0xE8), (REG_VBATL_RES, 0x05)]);
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default());
        let mut delay = NoDelay::default();
        assert_eq!(chg.value_vbatt_uv(&mut delay), Ok(4_088_000));
        assert_eq!(delay.total_ns, 5_000_000);
    }

    #[test]
    fn limit_accessors() {
        let mut i2c = MockI2c::default();
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default());
        chg.set_limit_current_ua(ChargeType::Adapter, 1_500_000).unwrap();
        chg.set_limit_current_ua(ChargeType::Usb, 2_000_000).unwrap();
        chg.set_charge_current_ua(300_000).unwrap();
        assert_eq!(chg.limit_current_ua(ChargeType::Adapter), Ok(1_500_000));
        assert_eq!(chg.limit_current_ua(ChargeType::Usb), Ok(0));
        assert_eq!(chg.limit_current_ua(ChargeType::None), Err(Error::InvalidInput));
        assert_eq!(chg.charge_current_ua(), Ok(300_000));
    }

    #[test]
    fn report_marks_unlimited_usb() {
        let mut i2c = MockI2c::with(&[
            (REG_STATUS, STATUS_ACEN),
            (REG_CAP, 0xD5),
            (REG_IPS_SET, USB_LIMIT_NONE),
            (REG_CHARGE1, 0x88),
            (REG_CHARGE3, 0x08),
        ]);
        let mut chg = Axp228Charger::new(&mut i2c, ChargerPlatdata::default());
        let r = ChargerReport::collect(&mut chg, &mut NoDelay::default()).unwrap();
        r.log();
        assert_eq!(r.kind, ChargeType::Adapter);
        assert_eq!(r.gauge, 0x55);
        assert_eq!(r.charge_ma, 1500);
        assert_eq!(r.adp_limit_ma, 1500);
        assert_eq!(r.usb_limit_ma, None);
    }

    static TABLE: PropertyTable<'static> = PropertyTable::new(&[Node {
        path: CHARGER_NODE,
        props: &[
            Property::int("chg,ghcledfun", 1),
            Property::int("chg,usbvolim", 4700),
            Property::cells("chg,ocvreg", &[0x100, 0x02, 0x03]),
        ],
    }]);

    #[test]
    fn platdata_from_properties() {
        let pd = ChargerPlatdata::from_config(&TABLE);
        assert_eq!(pd.chgled_fun, Some(1));
        assert_eq!(pd.usb_vol_lim, Some(4700));
        assert_eq!(pd.usb_cur_lim, None);
        // one byte per cell
        assert_eq!(pd.ocv_table.as_deref(), Some(&[0x00, 0x02, 0x03][..]));
    }
}
