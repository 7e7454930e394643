pub mod classes;
pub mod init;
pub mod run;
pub mod validate;
