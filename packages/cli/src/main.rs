fn main() {
    if let Err(err) = sqlbind_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
