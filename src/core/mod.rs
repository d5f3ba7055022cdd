pub mod correction;
pub mod integrity;
pub mod logic;
pub mod summary;
pub mod validator;
