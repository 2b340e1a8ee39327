use dotenv_layers::{get_var, Dotenv, DotenvError};

fn main() -> Result<(), DotenvError> {
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Debug)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let mut loader = Dotenv::from_path(&path);

    // Names only; values often hold secrets.
    let base = loader.process_file_list(loader.resolve_location()?.candidate_files(""))?;
    loader.load()?;

    println!("APP_ENV={}", get_var("APP_ENV"));
    for name in base.names() {
        println!("loaded {name}");
    }

    Ok(())
}
