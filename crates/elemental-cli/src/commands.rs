pub mod fix;
pub mod generate;
pub mod patch;
pub mod paths;
