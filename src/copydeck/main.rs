mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}
