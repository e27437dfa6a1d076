pub(crate) mod draw;
pub(crate) mod frame;
pub(crate) mod interact;
pub(crate) mod trace;
