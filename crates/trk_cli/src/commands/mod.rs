//! CLI commands.

pub mod add;
pub mod commit;
pub mod init;
pub mod log;
pub mod status;
pub mod verify;
