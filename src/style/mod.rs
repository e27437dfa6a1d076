pub(crate) mod kinds;
pub(crate) mod theme;
