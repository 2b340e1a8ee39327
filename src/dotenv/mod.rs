//! Layered `.env` file loading.

mod error;
mod file;
mod loader;
mod parse;
mod store;
mod vars;

pub use error::{DotenvError, SyntaxError};
pub use file::{
    process_file, process_file_list, ResolvedLocation, DEFAULT_FILE_NAME, LOCAL_SUFFIX,
};
pub use loader::{Dotenv, DEFAULT_APP_ENV_NAME};
pub use parse::{is_valid_name, is_valid_value, parse_line, parse_str};
pub use store::{get_var, EnvStore, MemoryEnv, ProcessEnv};
pub use vars::VariableSet;
