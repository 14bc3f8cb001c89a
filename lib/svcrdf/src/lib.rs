#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

pub mod batch;
pub mod config;
pub mod error;
pub mod io;
pub mod sparql;
pub mod store;

pub mod model {
    pub use svcrdf_model::*;
}

pub mod documents {
    pub use svcrdf_documents::*;
}

pub mod mapping {
    pub use svcrdf_mapping::*;
}
