pub mod creators;
pub mod predictions;
pub mod prices;
pub mod sources;
pub mod transforms;

pub use creators::*;
pub use predictions::*;
pub use prices::*;
