pub mod availability;
pub mod calendar;
pub mod consolidation;
pub mod normalize;
pub mod slots;

pub use availability::*;
pub use calendar::*;
pub use consolidation::*;
pub use normalize::*;
pub use slots::*;
