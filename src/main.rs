fn main() {
    if let Err(err) = scicalc::cli::run() {
        eprintln!("Error: {err:#}");
        #[allow(clippy::exit)]
        std::process::exit(1);
    }
}
