pub(crate) mod player;
pub(crate) mod union;
