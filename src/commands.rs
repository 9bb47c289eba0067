pub mod fetch;
pub mod negotiate;
pub mod wants;
