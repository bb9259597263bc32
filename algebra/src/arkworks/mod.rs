mod gt;
pub use gt::*;

mod group;
pub use group::*;

mod pairing;
pub use pairing::*;

mod scalar;
pub use scalar::*;
