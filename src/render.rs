pub(crate) mod backend;
pub(crate) mod context;
pub(crate) mod cpu;
#[cfg(feature = "gpu")]
pub(crate) mod gpu;
