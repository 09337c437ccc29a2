//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod check_password;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod import_cmd;
pub mod new;
pub mod show;
