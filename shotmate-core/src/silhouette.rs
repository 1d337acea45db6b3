pub(crate) mod data;
pub(crate) mod draws;
pub(crate) mod layout;
pub(crate) mod seed;
pub(crate) mod svg;
