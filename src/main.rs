//! Binary entry point for the `tmf` command-line tool.

fn main() {
    if let Err(e) = tmf::cli::run() {
        eprintln!("tmf: {e:#}");
        std::process::exit(1);
    }
}
