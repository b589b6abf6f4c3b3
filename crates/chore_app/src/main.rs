use chore_app::app::{run, AppConfig};

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid chore dashboard configuration: {err:#}");
            std::process::exit(2);
        }
    };
    match run(&config).and_then(|dashboard| Ok(serde_json::to_string_pretty(&dashboard)?)) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Chore dashboard failed: {err:#}");
            std::process::exit(1);
        }
    }
}
