pub mod check;
pub mod init;
pub mod mkdir;
pub mod mv;
pub mod open;
pub mod rename;
pub mod rm;
pub mod show;
pub mod touch;
pub mod vfolder;

pub use check::check_command;
pub use init::init_command;
pub use mkdir::mkdir_command;
pub use mv::mv_command;
pub use open::open_command;
pub use rename::rename_command;
pub use rm::rm_command;
pub use show::show_command;
pub use touch::touch_command;
pub use vfolder::vfolder_command;
