//! Mechanics shared by the provisioning steps
//!
//! - **shell**: run commands through `sh -c`
//! - **download**: streaming HTTPS fetch with optional SHA-256 verification
//! - **extract**: native tar.gz / tar.xz / zip extraction
//! - **git**: validated repository clones
//! - **fsx**: filesystem odds and ends (backups, parent dirs)

pub mod download;
pub mod extract;
pub mod fsx;
pub mod git;
pub mod shell;
