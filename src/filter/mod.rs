pub(crate) mod contributors;
pub(crate) mod kernels;
