pub mod src {
    pub mod host;
    pub mod type_names;
}

pub use src::host::*;
pub use src::type_names::*;

#[cfg(test)]
mod test;
