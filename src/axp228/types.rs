//! Public enums and driver error type.

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusOp {
    Read,
    Write,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C transfer failed. Carries the device address and register for diagnostics.
    Bus { addr: u8, reg: u8, op: BusOp, err: E },
    /// A register group needs several properties and at least one is missing.
    ConfigurationIncomplete(&'static str),
    /// Parameter outside allowed range.
    InvalidInput,
}

impl<E> Error<E> {
    pub fn is_bus(&self) -> bool {
        matches!(self, Error::Bus { .. })
    }
}

/// Power source the charger is drawing from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeType {
    None,
    /// Wall adapter ("TA"), either on ACIN or a VBUS supply with no host behind it.
    Adapter,
    Usb,
}

impl ChargeType {
    pub fn label(self) -> &'static str {
        match self {
            ChargeType::Usb => "USB",
            ChargeType::Adapter => "ADP",
            ChargeType::None => "NONE",
        }
    }
}

/// Result of applying one configuration group.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Written,
    Unchanged,
    /// Property not configured.
    Skipped,
}

impl From<bool> for Outcome {
    fn from(written: bool) -> Self {
        if written { Outcome::Written } else { Outcome::Unchanged }
    }
}

/// Tally of a probe pass.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbeSummary {
    pub written: u8,
    pub unchanged: u8,
    pub skipped: u8,
    pub incomplete: u8,
    pub failed: u8,
}

impl ProbeSummary {
    /// Fold one group's result into the tally, logging anything that went wrong.
    pub(crate) fn record<E>(&mut self, group: &'static str, res: Result<Outcome, Error<E>>) {
        match res {
            Ok(Outcome::Written) => self.written += 1,
            Ok(Outcome::Unchanged) => self.unchanged += 1,
            Ok(Outcome::Skipped) => self.skipped += 1,
            Err(Error::ConfigurationIncomplete(what)) => {
                debug!("AXP228: {} skipped, {} not fully configured", group, what);
                self.incomplete += 1;
            }
            Err(Error::Bus { addr, reg, op, .. }) => {
                error!("AXP228: {} failed, {:?} error at dev 0x{:02x} reg 0x{:02x}", group, op, addr, reg);
                self.failed += 1;
            }
            Err(Error::InvalidInput) => {
                warn!("AXP228: {} rejected, value out of range", group);
                self.failed += 1;
            }
        }
    }

    pub fn merge(&mut self, other: ProbeSummary) {
        self.written += other.written;
        self.unchanged += other.unchanged;
        self.skipped += other.skipped;
        self.incomplete += other.incomplete;
        self.failed += other.failed;
    }
}

/// Every member of a composite group, or `None` if any is missing.
pub(crate) fn all_present<const N: usize>(vals: [Option<i32>; N]) -> Option<[i32; N]> {
    let mut out = [0i32; N];
    for (slot, v) in out.iter_mut().zip(vals) {
        *slot = v?;
    }
    Some(out)
}
