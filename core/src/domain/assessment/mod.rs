pub mod entities;
pub mod ports;
pub mod prompts;
pub mod response;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
