use std::process;

fn main() {
    process::exit(lesstest::cli::run_cli());
}
