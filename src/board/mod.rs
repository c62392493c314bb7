//! Boot-time board hooks: GPIO bases, DRAM layout, recovery, splash and power bring-up.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;

use crate::axp228::{
    Axp228Charger, Axp228Pmic, ChargeControllable, ChargerPlatdata, ChargerReport, PmicPlatdata, ProbeSummary,
    PMIC_NODE,
};
use crate::config;
use crate::fdt::ConfigSource;
use crate::mmio::RegisterBlock;

pub mod drone_ref;

/// GPIOA..GPIOE controller bases.
pub const GPIO_BASES: [usize; 5] = [0xC001_A000, 0xC001_B000, 0xC001_C000, 0xC001_D000, 0xC001_E000];

/// MMC device holding the environment.
pub const ENV_MMC_DEV: u32 = 0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DramBank {
    pub start: u64,
    pub size: u64,
}

/// Board state shared by the boot hooks.
#[derive(Clone, Debug, Default)]
pub struct BoardContext {
    pub gpio_bases: [usize; 5],
    pub ram_size: u64,
    pub dram: [DramBank; 1],
    pub boot_params: u64,
    /// Frame buffer the splash image is loaded into.
    pub fb_base: usize,
}

/// Persistent boot environment.
pub trait Environment {
    type Error;

    fn set(&mut self, name: &str, value: &str) -> Result<(), Self::Error>;
}

pub fn board_init(ctx: &mut BoardContext) {
    ctx.gpio_bases = GPIO_BASES;
}

pub fn dram_init(ctx: &mut BoardContext) {
    ctx.ram_size = config::SYS_SDRAM_SIZE;
}

pub fn dram_init_banksize(ctx: &mut BoardContext) {
    ctx.boot_params = config::SYS_SDRAM_BASE + config::BOOT_PARAMS_OFFSET;
    ctx.dram[0] = DramBank { start: config::SYS_SDRAM_BASE, size: config::SYS_SDRAM_SIZE };
}

/// Consume a recovery request left in the alive scratch register.
///
/// `alive` is the ALIVE block at [`config::ALIVE_BASE`].
pub fn check_recovery<A: RegisterBlock>(alive: &mut A) -> bool {
    let sig = alive.read32(config::ALIVE_SCRATCH1_READ_OFFSET);
    debug!("signature --> 0x{:x}", sig);
    if sig != config::RECOVERY_SIGNATURE {
        return false;
    }
    info!("reboot recovery!!!!");
    alive.write32(config::ALIVE_SCRATCH1_RESET_OFFSET, 0xffff_ffff);
    true
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LateInit {
    pub recovery: bool,
    /// `None` without a charger, or when reading it failed.
    pub charger: Option<ChargerReport>,
}

pub fn board_late_init<E, A, C, D>(
    env: &mut E,
    alive: &mut A,
    charger: Option<&mut C>,
    delay: &mut D,
) -> Result<LateInit, E::Error>
where
    E: Environment,
    A: RegisterBlock,
    C: ChargeControllable,
    D: DelayNs,
{
    env.set("board_rev", "0")?;

    let recovery = check_recovery(alive);
    if recovery {
        env.set("bootcmd", config::RECOVERY_BOOTCMD)?;
    }

    let charger = charger.and_then(|c| match ChargerReport::collect(c, delay) {
        Ok(r) => {
            r.log();
            Some(r)
        }
        Err(_) => {
            warn!("AXP228 Charger: status unavailable");
            None
        }
    });

    Ok(LateInit { recovery, charger })
}

// ------------------ Splash ------------------

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SplashStorage {
    /// File on a filesystem partition, `"dev:part"`.
    MmcFs { devpart: &'static str },
    /// Raw image at a byte offset on the device.
    MmcRaw { offset: u32 },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SplashLocation {
    pub name: &'static str,
    pub storage: SplashStorage,
}

pub static SPLASH_LOCATIONS: [SplashLocation; 2] = [
    SplashLocation { name: "mmc_fs", storage: SplashStorage::MmcFs { devpart: config::SPLASH_MMC_DEVPART } },
    SplashLocation { name: "mmc", storage: SplashStorage::MmcRaw { offset: config::SPLASH_MMC_OFFSET } },
];

/// Loads the splash image from the first location that has one.
pub trait SplashLoader {
    type Error;

    fn load(&mut self, locations: &[SplashLocation]) -> Result<(), Self::Error>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SplashError<L, E> {
    Load(L),
    Env(E),
    /// Frame buffer address did not fit the value buffer.
    Format,
}

/// Load the splash image and publish the frame buffer address as `fb_addr`.
pub fn splash_screen_prepare<L, E>(ctx: &BoardContext, loader: &mut L, env: &mut E) -> Result<(), SplashError<L::Error, E::Error>>
where
    L: SplashLoader,
    E: Environment,
{
    loader.load(&SPLASH_LOCATIONS).map_err(SplashError::Load)?;

    // "0x" plus at most 16 hex digits
    let mut addr: String<18> = String::new();
    write!(addr, "0x{:x}", ctx.fb_base).map_err(|_| SplashError::Format)?;
    env.set("fb_addr", &addr).map_err(SplashError::Env)
}

// ------------------ Power ------------------

/// Probe the PMIC then bring every configured rail to its configured state.
///
/// `None` when the configuration has no PMIC node.
pub fn power_init_board<I2C, S>(i2c: I2C, src: &S) -> Option<ProbeSummary>
where
    I2C: I2c,
    S: ConfigSource + ?Sized,
{
    if !src.has_node(PMIC_NODE) {
        error!("Can't get PMIC: {}!", PMIC_NODE);
        return None;
    }
    let mut pmic = Axp228Pmic::new(i2c);
    let mut s = pmic.probe(&PmicPlatdata::from_config(src));
    s.merge(pmic.apply_rails(src));
    info!(
        "AXP228: power init done, {} written, {} unchanged, {} failed",
        s.written, s.unchanged, s.failed
    );
    Some(s)
}

/// Parse the charger configuration and apply it.
pub fn charger_init<I2C, S>(i2c: I2C, src: &S) -> (Axp228Charger<I2C>, ProbeSummary)
where
    I2C: I2c,
    S: ConfigSource + ?Sized,
{
    let mut chg = Axp228Charger::new(i2c, ChargerPlatdata::from_config(src));
    let s = chg.probe();
    (chg, s)
}
