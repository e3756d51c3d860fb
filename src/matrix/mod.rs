// Ring matrix data structure and algebra

mod cell;
pub mod config;
pub mod multiply;
pub mod ops;
pub mod ring;

pub use cell::Scalar;
pub use config::{EngineConfig, SystemParameters};
pub use ring::{ColIter, RingMatrix, RowIter};
