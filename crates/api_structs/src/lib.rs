mod queue;
mod settings;
mod status;

pub mod dtos {
    pub use crate::queue::dtos::*;
    pub use crate::settings::dtos::*;
}

pub use crate::queue::api::*;
pub use crate::settings::api::*;
pub use crate::status::api::*;
