pub(crate) mod arena;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod horizontal;
pub(crate) mod ring;
pub(crate) mod scanline;
pub(crate) mod surface;
