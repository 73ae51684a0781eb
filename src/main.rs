fn main() {
    if let Err(e) = pathsearch::solver() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
