pub mod codec;
pub mod demo;
pub mod markup;
pub mod model;
pub mod store;
