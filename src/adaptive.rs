pub(crate) mod appearance;
pub(crate) mod selector;
