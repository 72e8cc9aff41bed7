pub mod src {
    pub mod api;
    pub mod compilation;
    pub mod sink;
    pub mod target;
}

pub use src::api::*;
pub use src::compilation::*;
pub use src::sink::*;
pub use src::target::*;

#[cfg(test)]
mod test;
