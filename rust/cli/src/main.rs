use std::io;

fn main() {
    thirteen_cli::logging::init_logging();
    let code = thirteen_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
