pub mod check;
pub mod init;
pub mod inputs;
pub mod layout;
pub mod render;
