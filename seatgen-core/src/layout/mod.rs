pub mod generator;
pub mod naming;
pub mod placer;
pub mod rows;
pub mod sampler;
pub mod section;
pub mod validator;
