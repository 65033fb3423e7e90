//! Zero-based column positions in the two source extracts.
//!
//! The layouts differ between the park and toilet files and must stay as
//! they are; downstream consumers and older exports depend on them.

pub mod park {
    pub const ID: usize = 1;
    pub const NAME: usize = 3;
    pub const ADDRESS: usize = 6;
    pub const LONGITUDE: usize = 8;
    pub const LATITUDE: usize = 9;
}

pub mod toilet {
    pub const ID: usize = 1;
    pub const NAME: usize = 4;
    pub const ADDRESS: usize = 7;
    pub const LATITUDE: usize = 10;
    pub const LONGITUDE: usize = 11;
    pub const MEN_TOTAL: usize = 12;
    pub const MEN_URINAL: usize = 13;
    pub const MEN_SQUAT: usize = 14;
    pub const MEN_WESTERN: usize = 15;
    pub const WOMEN_TOTAL: usize = 16;
    pub const WOMEN_SQUAT: usize = 17;
    pub const WOMEN_WESTERN: usize = 18;
    pub const UNISEX_TOTAL: usize = 19;
    pub const UNISEX_SQUAT: usize = 20;
    pub const UNISEX_WESTERN: usize = 21;
    pub const MULTIFUNCTION: usize = 22;
    pub const WHEELCHAIR: usize = 23;
    pub const BABY_ROOM: usize = 24;
    pub const OSTOMY: usize = 25;
}
