fn main() {
    if let Err(err) = sosindex::cli::run() {
        sosindex::ui::eprintln_error(&err);
        std::process::exit(sosindex::exit::exit_code(&err));
    }
}
