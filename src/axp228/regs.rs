//! Register addresses and bit masks for the AXP228.

pub const I2C_ADDR: u8 = 0x34;
pub const NUM_OF_REGS: usize = 0xFF;

// Status
pub const REG_STATUS: u8 = 0x00;
pub const   STATUS_SOURCE: u8   = 1 << 0;
pub const   STATUS_ACUSBSH: u8  = 1 << 1;
pub const   STATUS_BATCURDIR: u8 = 1 << 2;
pub const   STATUS_USBLAVHO: u8 = 1 << 3;
pub const   STATUS_USBVA: u8    = 1 << 4;
pub const   STATUS_USBEN: u8    = 1 << 5;
pub const   STATUS_ACVA: u8     = 1 << 6;
pub const   STATUS_ACEN: u8     = 1 << 7;

pub const REG_MODE_CHGSTATUS: u8 = 0x01;
pub const   CHGSTATUS_BATINACT: u8 = 1 << 3;
pub const   CHGSTATUS_BATEN: u8    = 1 << 5;
pub const   CHGSTATUS_INCHAR: u8   = 1 << 6;
pub const   CHGSTATUS_ICTEMOV: u8  = 1 << 7;

pub const REG_IC_TYPE: u8 = 0x03;

// Rail enables
pub const REG_LDO_DC_EN1: u8 = 0x10;
pub const REG_LDO_DC_EN2: u8 = 0x12;
pub const REG_LDO_DC_EN3: u8 = 0x13;

// Rail voltages
pub const REG_DLDO1OUT_VOL: u8 = 0x15;
pub const REG_DLDO2OUT_VOL: u8 = 0x16;
pub const REG_DLDO3OUT_VOL: u8 = 0x17;
pub const REG_DLDO4OUT_VOL: u8 = 0x18;
pub const REG_ELDO1OUT_VOL: u8 = 0x19;
pub const REG_ELDO2OUT_VOL: u8 = 0x1A;
pub const REG_ELDO3OUT_VOL: u8 = 0x1B;
pub const REG_DC5LDOOUT_VOL: u8 = 0x1C;
pub const REG_DC1OUT_VOL: u8 = 0x21;
pub const REG_DC2OUT_VOL: u8 = 0x22;
pub const REG_DC3OUT_VOL: u8 = 0x23;
pub const REG_DC4OUT_VOL: u8 = 0x24;
pub const REG_DC5OUT_VOL: u8 = 0x25;
pub const REG_ALDO1OUT_VOL: u8 = 0x28;
pub const REG_ALDO2OUT_VOL: u8 = 0x29;
pub const REG_ALDO3OUT_VOL: u8 = 0x2A;

pub const REG_IPS_SET: u8 = 0x30;
pub const   VBUS_VHOLD_EN: u8     = 1 << 6;
pub const   VBUS_VHOLD_MASK: u8   = 0b0011_1000; // <<3
pub const   VBUS_CLIMIT_MASK: u8  = 0b0000_0011;
pub const   USB_LIMIT_900: u8     = 0x00;
pub const   USB_LIMIT_500: u8     = 0x01;
pub const   USB_LIMIT_NONE: u8    = 0x03;

pub const REG_VOFF_SET: u8 = 0x31;
pub const   VOFF_MASK: u8 = 0b0000_0111;

// OFF_CTL and PDBC share an address
pub const REG_OFF_CTL: u8 = 0x32;
pub const REG_PDBC: u8 = 0x32;
pub const   BATDET_EN: u8       = 1 << 6;
pub const   CHGLED_FUN: u8      = 1 << 3;
pub const   PEK_DELAY_MASK: u8  = 0b0000_0011;

pub const REG_CHARGE1: u8 = 0x33;
pub const   CHARGE_EN: u8 = 1 << 7;
pub const   CHARGE_CUR_MASK: u8 = 0x0F;

pub const REG_CHARGE2: u8 = 0x34;
pub const   BAT_REG_EN: u8 = 1 << 5;

pub const REG_CHARGE3: u8 = 0x35;
pub const   LIMIT_CUR_MASK: u8 = 0x0F;

pub const REG_POK_SET: u8 = 0x36;
pub const   PEK_ON_MASK: u8       = 0b1100_0000; // <<6
pub const   PEK_LONG_MASK: u8     = 0b0011_0000; // <<4
pub const   PEK_OFF_EN: u8        = 1 << 3;
pub const   PEK_OFF_RESTART: u8   = 1 << 2;
pub const   PEK_OFF_MASK: u8      = 0b0000_0011;

pub const REG_DCDC_FREQSET: u8 = 0x37;

pub const REG_INTEN1: u8 = 0x40;
pub const REG_INTEN2: u8 = 0x41;
pub const REG_INTEN3: u8 = 0x42;
pub const REG_INTEN4: u8 = 0x43;
pub const REG_INTEN5: u8 = 0x44;

pub const REG_CHGLED_CTL: u8 = 0x45;
pub const   CHGLED_TYPE_B: u8 = 1 << 4;

pub const REG_INTSTS1: u8 = 0x48;
pub const REG_INTSTS2: u8 = 0x49;
pub const REG_INTSTS3: u8 = 0x4A;
pub const REG_INTSTS4: u8 = 0x4B;
pub const REG_INTSTS5: u8 = 0x4C;

// ADC results, 12 bit split as H[7:0] L[3:0]
pub const REG_VBATH_RES: u8 = 0x78;
pub const REG_VBATL_RES: u8 = 0x79;
pub const REG_ICHGH_RES: u8 = 0x7A;
pub const REG_ICHGL_RES: u8 = 0x7B;
pub const REG_DISICHGH_RES: u8 = 0x7C;
pub const REG_DISICHGL_RES: u8 = 0x7D;

pub const REG_DCDC_MODESET: u8 = 0x80;
pub const REG_ADC_EN: u8 = 0x82;
pub const REG_ADC_CONTROL3: u8 = 0x84;
pub const REG_HOTOVER_CTL: u8 = 0x8F;

// Fuel gauge
pub const REG_COULOMB_CTL: u8 = 0xB8;
pub const   CAP_CORRECT_EN: u8 = 1 << 5;
pub const REG_CAP: u8 = 0xB9;
pub const   CAP_PERCENT_MASK: u8 = 0x7F;
pub const REG_RDC0: u8 = 0xBA;
pub const   RDC_CALIBRATED: u8 = 1 << 6;
pub const   RDC_WRITE_EN: u8   = 1 << 7;
pub const   RDC_HIGH_MASK: u8  = 0x1F;
pub const REG_RDC1: u8 = 0xBB;
pub const REG_OCVBATH_RES: u8 = 0xBC;
pub const REG_OCVBATL_RES: u8 = 0xBD;
pub const REG_OCV_TABLE: u8 = 0xC0;
pub const OCV_TABLE_SIZE: usize = 32;
pub const REG_BATFULLCAPH_RES: u8 = 0xE0;
pub const   BATCAP_VALID: u8 = 1 << 7;
pub const REG_BATFULLCAPL_RES: u8 = 0xE1;
pub const REG_WARNING_LEVEL: u8 = 0xE6;
