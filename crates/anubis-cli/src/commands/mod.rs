pub mod capacity;
pub mod eject;
pub mod inject;
