pub mod init;
pub mod sync;
