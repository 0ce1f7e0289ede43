pub(crate) mod compositor;
pub(crate) mod paste;
pub(crate) mod scale;
