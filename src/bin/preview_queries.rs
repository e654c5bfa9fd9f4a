//! Print the catalog queries a request list would issue, without any network calls.
//! Usage: cargo run --release --bin preview-queries -- <requests.json|requests.csv>

use anyhow::Result;
use std::path::Path;

use hifi_playlist::loader::load_requests;
use hifi_playlist::resolver::DEFAULT_STRATEGIES;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: preview-queries <requests.json|requests.csv>");
        std::process::exit(1);
    }

    let loaded = load_requests(Path::new(&args[1]))?;

    println!("\n=== QUERIES ===\n");
    for (i, request) in loaded.requests.iter().enumerate() {
        println!("[{}] '{}' by {}", i, request.album, request.artist);
        for strategy in DEFAULT_STRATEGIES {
            println!("  {:<11} {}", strategy.label(), strategy.query(request));
        }
        println!();
    }

    if !loaded.rejected.is_empty() {
        println!("=== REJECTED RECORDS ===\n");
        for r in &loaded.rejected {
            println!("[{}] {}", r.index, r.reason);
        }
        println!();
    }

    println!(
        "Requests: {}  Rejected: {}",
        loaded.requests.len(),
        loaded.rejected.len()
    );
    Ok(())
}
