//! Equipments Plugin SDK
//!
//! Resource contracts and plugin manifest types shared between the
//! plugin registrar and the kernel. Everything here is plain data with
//! serde (de)serialization; the kernel owns all behavior.

pub mod equipment;
pub mod extension;
pub mod types;
pub mod validate;

pub mod prelude {
    pub use crate::equipment::*;
    pub use crate::extension::*;
    pub use crate::types::*;
}
