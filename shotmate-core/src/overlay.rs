pub(crate) mod composite;
pub(crate) mod prepare;
pub(crate) mod source;
pub(crate) mod transform;
