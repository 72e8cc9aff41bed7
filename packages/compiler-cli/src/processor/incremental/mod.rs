pub mod src {
    pub mod dependencies;
    pub mod dependency_tracking;
}

pub use src::dependencies::*;
pub use src::dependency_tracking::*;

#[cfg(test)]
mod test;
