pub(crate) mod camera;
pub(crate) mod collaborators;
pub(crate) mod flows;
pub(crate) mod store;
