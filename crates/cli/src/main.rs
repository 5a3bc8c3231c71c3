fn main() {
    if let Err(e) = classpack_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
