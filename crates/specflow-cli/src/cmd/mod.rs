pub mod check;
pub mod init;
pub mod new;
pub mod paths;
pub mod plan;
pub mod sync;
