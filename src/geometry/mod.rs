pub(crate) mod contrast;
pub(crate) mod edge;
pub(crate) mod label;
pub(crate) mod mapper;
