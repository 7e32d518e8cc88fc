fn main() {
    if let Err(e) = sbguard::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
