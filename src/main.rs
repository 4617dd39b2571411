fn main() {
    if let Err(err) = electromos_assets::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
