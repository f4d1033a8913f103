use std::io;

use shopbingo_cli::logging;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args
        .iter()
        .skip(1)
        .any(|a| a == "--verbose" || a == "-v");
    logging::init_logging(verbose);

    let code = shopbingo_cli::run(args, &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
