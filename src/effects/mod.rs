pub(crate) mod jitter;
