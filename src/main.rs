fn main() {
    if let Err(err) = susenas_viewer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
