fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(err) = wire_router::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
