pub mod src {
    pub mod extractor;
    pub mod generator;
    pub mod handler;
    pub mod properties;
    pub mod request;
    pub mod validator;
}

pub use src::extractor::*;
pub use src::generator::*;
pub use src::handler::*;
pub use src::properties::*;
pub use src::request::*;
pub use src::validator::*;
