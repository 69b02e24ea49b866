use std::io;

fn main() {
    spider_cli::logging::init_logging();
    let code = spider_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
