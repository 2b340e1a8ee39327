pub mod dotenv;

pub use dotenv::{
    get_var, Dotenv, DotenvError, EnvStore, MemoryEnv, ProcessEnv, SyntaxError, VariableSet,
};
