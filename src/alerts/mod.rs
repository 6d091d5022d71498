pub mod extract;
pub mod filter;

pub use extract::extract;
pub use filter::{area_variants, filter, match_area, AreaMatch};
