//! Built-in hardware description for the drone reference board.

use crate::fdt::{Node, Property, PropertyTable};

pub static PROPERTIES: PropertyTable<'static> = PropertyTable::new(&[
    Node {
        path: "init-axp228",
        props: &[
            Property::int("axp228,freq_spread_en", 1),
            Property::int("axp228,spread_freq", 0),
            Property::int("axp228,poly_phase_function", 0),
            Property::int("axp228,switch_freq", 8),
            Property::int("axp228,voff_set", 3),
            Property::int("axp228,adc_control3", 0x00),
            Property::int("axp228,irq_wakeup", 0),
            Property::int("axp228,vbusacin_func", 0),
            Property::int("axp228,vbusacin_status", 0),
            Property::int("axp228,vbus_en", 1),
            Property::int("axp228,pmu_reset", 0),
            Property::int("axp228,overtmu_pwr_off", 1),
        ],
    },
    Node {
        path: "init-charger",
        props: &[
            Property::int("chg,usbvolim", 4700),
            Property::int("chg,usbvollimen", 1),
            Property::int("chg,usbcurlim", 500),
            Property::int("chg,usbcurlimen", 1),
            Property::int("chg,charge_current", 1_500_000),
            Property::int("chg,limit_current", 1_500_000),
            Property::int("chg,batlowlv1", 15),
            Property::int("chg,batlowlv2", 0),
            Property::int("chg,ghcledfun", 1),
            Property::int("chg,chgledtype", 0),
            Property::int("chg,batcapcorrent", 1),
            Property::int("chg,batreguen", 0),
            Property::int("chg,batdet", 1),
        ],
    },
    Node { path: "voltage-regulators", props: &[] },
    Node {
        path: "voltage-regulators/dcdc1",
        props: &[Property::int("axp228,vol", 3300), Property::int("axp228,on", 1), Property::int("axp228,work_mode", 0)],
    },
    Node {
        path: "voltage-regulators/dcdc2",
        props: &[Property::int("axp228,vol", 1100), Property::int("axp228,on", 1), Property::int("axp228,work_mode", 0)],
    },
    Node {
        path: "voltage-regulators/dcdc3",
        props: &[Property::int("axp228,vol", 1100), Property::int("axp228,on", 1), Property::int("axp228,work_mode", 0)],
    },
    Node {
        path: "voltage-regulators/dcdc4",
        props: &[Property::int("axp228,vol", 1500), Property::int("axp228,on", 1), Property::int("axp228,work_mode", 0)],
    },
    Node {
        path: "voltage-regulators/dcdc5",
        props: &[Property::int("axp228,vol", 1500), Property::int("axp228,on", 1), Property::int("axp228,work_mode", 0)],
    },
    Node {
        path: "voltage-regulators/aldo1",
        props: &[Property::int("axp228,vol", 3300), Property::int("axp228,on", 1)],
    },
    Node {
        path: "voltage-regulators/aldo2",
        props: &[Property::int("axp228,vol", 1800), Property::int("axp228,on", 1)],
    },
    Node {
        path: "voltage-regulators/aldo3",
        props: &[Property::int("axp228,vol", 3300), Property::int("axp228,on", 0)],
    },
    Node {
        path: "voltage-regulators/dldo1",
        props: &[Property::int("axp228,vol", 3300), Property::int("axp228,on", 1)],
    },
    Node {
        path: "voltage-regulators/dldo2",
        props: &[Property::int("axp228,vol", 1800), Property::int("axp228,on", 1)],
    },
    Node {
        path: "voltage-regulators/eldo1",
        props: &[Property::int("axp228,vol", 1800), Property::int("axp228,on", 0)],
    },
    Node {
        path: "voltage-regulators/dc5ldo",
        props: &[Property::int("axp228,vol", 1200), Property::int("axp228,on", 1)],
    },
]);
