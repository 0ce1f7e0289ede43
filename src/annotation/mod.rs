pub(crate) mod coco;
pub(crate) mod record;
