fn main() {
    if let Err(e) = jerseylab_lib::run() {
        eprintln!("jerseylab: {e}");
        std::process::exit(1);
    }
}
