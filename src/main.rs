fn main() {
    if let Err(err) = olympic_ingest::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
