use smartstring::{LazyCompact, SmartString};

pub mod auto_pairs;
pub mod buffer;
pub mod input;
pub mod table;

pub type Tendril = SmartString<LazyCompact>;
