use canonical::{tokenize_with, TokenizeConfig};

fn main() {
    let content = "The quick brown fox jumps over the lazy dog.\n\
                   \"Quick!\" said the fox, and jumped again.";

    let cfg = TokenizeConfig::default();
    for token in tokenize_with(content, &cfg) {
        println!(
            "{:>3}..{:<3} {:<8} key={}",
            token.start, token.end, token.text, token.key
        );
    }
}
