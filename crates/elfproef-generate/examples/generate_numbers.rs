use std::env;

use elfproef_generate::{ElfproefEngine, EngineOptions};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut prefix = String::new();
    let mut length = 9;
    let mut count = 10;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--prefix" => prefix = args.next().ok_or("missing --prefix value")?,
            "--length" => length = args.next().ok_or("missing --length value")?.parse()?,
            "--count" => count = args.next().ok_or("missing --count value")?.parse()?,
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let mut engine = ElfproefEngine::new(EngineOptions::default());
    for _ in 0..count {
        println!("{}", engine.generate(&prefix, length, true)?);
    }
    println!("generated={}", engine.generated().len());
    Ok(())
}
