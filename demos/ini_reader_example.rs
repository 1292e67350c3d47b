use ini_reader::{IniReader, ParseOptions};

fn main() {
    env_logger::init();

    // Example INI content
    let ini_content = r#"
; server configuration
[server]
host = example.com
port = 8080
use_tls = yes
timeout = 2.5
backends = 10.0.0.1, 10.0.0.2, 10.0.0.3

[main]
retries = 3

[notes]
body = first line
  second line ; inline comments work here too
"#;

    let reader = IniReader::from_content(ini_content);

    // 0 on success, line number of the first bad line otherwise
    println!("parse result: {}", reader.error());

    // All sections seen, in order
    println!("sections: {:?}", reader.sections());

    // Typed getters with defaults, section/name case-insensitive
    println!("host: {}", reader.get::<String>("Server", "Host", String::new()));
    println!("port: {}", reader.get::<i64>("server", "port", 0));
    println!("tls: {}", reader.get::<bool>("server", "use_tls", false));
    println!("timeout: {}", reader.get::<f64>("server", "timeout", 1.0));

    // Comma-delimited arrays
    println!("backends: {:?}", reader.get_array::<String>("server", "backends"));

    // Keys absent from a section fall back to [main]
    println!("retries: {}", reader.get::<i64>("server", "retries", 0));

    // Multi-line values come back newline-joined
    println!("note body: {:?}", reader.get::<String>("notes", "body", String::new()));

    // Options are plain struct fields
    let options = ParseOptions {
        comment_prefixes: ";#".to_string(),
        ..Default::default()
    };
    let hashed = IniReader::from_content_with("[s]\nk = 1 # stripped\n", &options);
    println!("with # comments: {}", hashed.get::<i64>("s", "k", 0));
}
