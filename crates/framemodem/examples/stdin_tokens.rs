//! Scans octet-counted framing from stdin and prints one line per token.
//!
//! ```text
//! printf '5 hello6 world!' | cargo run --example stdin_tokens
//! ```

use framemodem::Scanner;

fn main() {
    let stdin = std::io::stdin();
    let mut scanner = Scanner::from_reader(stdin.lock());
    for token in scanner.tokens() {
        println!("{token:?}");
    }
    if let Some(error) = scanner.source().last_error() {
        eprintln!("read failed: {error}");
    }
}
